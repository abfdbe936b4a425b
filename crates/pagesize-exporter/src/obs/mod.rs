//! In-process metrics for the exporter.
//!
//! Values live in atomics inside `DashMap`s and are rendered in Prometheus
//! text exposition format by the `/metrics` handler. The registry is an
//! explicit value shared by the poller and the HTTP layer; nothing registers
//! itself globally.

pub mod metrics;

pub use metrics::{CounterVec, ExporterMetrics, GaugeVec, HistogramVec, PAGE_SIZE_METRIC};
