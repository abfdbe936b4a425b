//! pagesize exporter library entry.
//!
//! Wires the site list, the poll loop, and the metrics HTTP surface into one
//! process. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod probe;
pub mod router;
pub mod server;

use std::sync::Arc;

use pagesize_core::error::Result;
use pagesize_core::sites;

use crate::config::ExporterConfig;
use crate::obs::ExporterMetrics;
use crate::probe::{HttpFetcher, PollSettings, Poller};

/// Everything startup produces before the server and loop are launched.
pub struct Exporter {
    pub state: app_state::AppState,
    pub poller: Poller,
}

impl Exporter {
    /// Load the site list and build the shared state. Fails on an unreadable
    /// or empty site list.
    pub fn build(cfg: ExporterConfig) -> Result<Self> {
        let urls = sites::load_from_file(&cfg.sites.file)?;
        tracing::info!(file = %cfg.sites.file, count = urls.len(), "loaded site list");

        let metrics = Arc::new(ExporterMetrics::new());
        let fetcher = Arc::new(HttpFetcher::new(cfg.poll.timeout())?);
        let poller = Poller::new(
            urls,
            fetcher,
            Arc::clone(&metrics),
            PollSettings::from(&cfg.poll),
        );
        let state = app_state::AppState::new(cfg, metrics);
        Ok(Self { state, poller })
    }

    /// Bind, start the poll loop, and serve `/metrics` until the server fails.
    pub async fn run(self) -> Result<()> {
        let listen = self.state.cfg().exporter.listen_addr()?;
        let listener = server::bind(listen).await?;
        tracing::info!(%listen, "pagesize-exporter starting");

        let _poll_task = self.poller.spawn();
        server::serve(listener, router::build_router(self.state)).await
    }
}
