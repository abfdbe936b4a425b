//! Shared application state for the exporter.
//!
//! Holds the metric registry the poller writes into, so the `/metrics`
//! handler reads the same values without any process-wide registration.

use std::sync::Arc;

use crate::config::ExporterConfig;
use crate::obs::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ExporterMetrics>,
}

struct AppStateInner {
    cfg: ExporterConfig,
}

impl AppState {
    pub fn new(cfg: ExporterConfig, metrics: Arc<ExporterMetrics>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics,
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.metrics)
    }
}
