//! pagesize core: error surface and site-list handling.
//!
//! This crate defines the pieces shared by the exporter binary and its tests:
//! the unified error type with stable codes, and the loader that turns a
//! newline-delimited site list into the set of URLs to monitor. It carries no
//! runtime or HTTP dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PageSizeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod sites;

/// Shared result type.
pub use error::{ErrorCode, PageSizeError, Result};
