//! Poll loop.
//!
//! Each cycle fans out one check per URL and waits for all of them before the
//! next cycle is scheduled. There is no cancellation: the loop runs until the
//! process exits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::{PollSection, Schedule};
use crate::obs::ExporterMetrics;
use crate::probe::checker::{check_page_size, CheckOutcome, PageFetcher};

/// Runtime knobs for the loop, derived from `poll:` config.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_concurrency: Option<usize>,
    pub schedule: Schedule,
}

impl From<&PollSection> for PollSettings {
    fn from(p: &PollSection) -> Self {
        Self {
            interval: p.interval(),
            max_concurrency: p.max_concurrency,
            schedule: p.schedule,
        }
    }
}

/// Summary of one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    pub checked: usize,
    pub failed: usize,
    pub elapsed: Duration,
    pub outcomes: Vec<CheckOutcome>,
}

#[derive(Clone)]
pub struct Poller {
    urls: Arc<[String]>,
    fetcher: Arc<dyn PageFetcher>,
    metrics: Arc<ExporterMetrics>,
    settings: PollSettings,
    limiter: Option<Arc<Semaphore>>,
}

impl Poller {
    pub fn new(
        urls: Vec<String>,
        fetcher: Arc<dyn PageFetcher>,
        metrics: Arc<ExporterMetrics>,
        settings: PollSettings,
    ) -> Self {
        let limiter = settings
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.max(1))));
        metrics.set_monitored_sites(urls.len());
        Self {
            urls: urls.into(),
            fetcher,
            metrics,
            settings,
            limiter,
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Check every URL once and wait for all checks to finish.
    pub async fn run_cycle(&self) -> CycleReport {
        let started = Instant::now();
        let mut tasks = JoinSet::new();

        for url in self.urls.iter() {
            let url = url.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let metrics = Arc::clone(&self.metrics);
            let limiter = self.limiter.clone();
            tasks.spawn(async move {
                // Semaphore is never closed, so acquire only fails if it were.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                check_page_size(fetcher.as_ref(), &metrics, &url).await
            });
        }

        let mut outcomes = Vec::with_capacity(self.urls.len());
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    if !outcome.is_ok() {
                        failed += 1;
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(error = %e, "check task aborted");
                }
            }
        }

        let cycle = self.metrics.inc_cycles();
        let elapsed = started.elapsed();
        tracing::info!(
            cycle,
            checked = self.urls.len(),
            failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "poll cycle complete"
        );

        CycleReport {
            cycle,
            checked: self.urls.len(),
            failed,
            elapsed,
            outcomes,
        }
    }

    /// Run cycles forever.
    pub async fn run(self) {
        match self.settings.schedule {
            Schedule::FixedDelay => loop {
                self.run_cycle().await;
                tokio::time::sleep(self.settings.interval).await;
            },
            Schedule::FixedRate => {
                let period = self.settings.interval.max(Duration::from_millis(1));
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    self.run_cycle().await;
                }
            }
        }
    }

    /// Run the loop on a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tracing::info!(
            sites = self.urls.len(),
            interval_ms = self.settings.interval.as_millis() as u64,
            schedule = self.settings.schedule.as_str(),
            max_concurrency = ?self.settings.max_concurrency,
            "poller starting"
        );
        tokio::spawn(self.run())
    }
}
