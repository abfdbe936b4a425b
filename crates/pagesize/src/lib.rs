//! Top-level facade crate for pagesize.
//!
//! Re-exports the core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use pagesize_core::*;
}

pub mod exporter {
    pub use pagesize_exporter::*;
}
