//! Config schema: strict sections with defaults and range checks.

use std::net::SocketAddr;
use std::time::Duration;

use pagesize_core::error::{PageSizeError, Result};
use pagesize_core::sites::DEFAULT_SITES_FILE;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub sites: SitesSection,

    #[serde(default)]
    pub poll: PollSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            sites: SitesSection::default(),
            poll: PollSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PageSizeError::BadConfig(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }
        self.exporter.validate()?;
        self.sites.validate()?;
        self.poll.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            PageSizeError::BadConfig(format!(
                "exporter.listen must be a valid SocketAddr, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9222".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitesSection {
    #[serde(default = "default_sites_file")]
    pub file: String,
}

impl Default for SitesSection {
    fn default() -> Self {
        Self { file: default_sites_file() }
    }
}

impl SitesSection {
    pub fn validate(&self) -> Result<()> {
        if self.file.trim().is_empty() {
            return Err(PageSizeError::BadConfig("sites.file must not be empty".into()));
        }
        Ok(())
    }
}

fn default_sites_file() -> String {
    DEFAULT_SITES_FILE.into()
}

/// When the next cycle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Sleep a full interval after the slowest check of a cycle finishes.
    #[default]
    FixedDelay,
    /// Start cycles at `start + N * interval`; overruns push the next tick back.
    FixedRate,
}

impl Schedule {
    pub fn as_str(self) -> &'static str {
        match self {
            Schedule::FixedDelay => "fixed_delay",
            Schedule::FixedRate => "fixed_rate",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on in-flight checks per cycle; `None` means one task per URL.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    #[serde(default)]
    pub schedule: Schedule,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            timeout_ms: default_timeout_ms(),
            max_concurrency: None,
            schedule: Schedule::default(),
        }
    }
}

impl PollSection {
    pub fn validate(&self) -> Result<()> {
        if !(1_000..=86_400_000).contains(&self.interval_ms) {
            return Err(PageSizeError::BadConfig(
                "poll.interval_ms must be between 1000 and 86400000".into(),
            ));
        }
        if !(100..=300_000).contains(&self.timeout_ms) {
            return Err(PageSizeError::BadConfig(
                "poll.timeout_ms must be between 100 and 300000".into(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(PageSizeError::BadConfig(
                "poll.max_concurrency must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_interval_ms() -> u64 {
    30_000
}
fn default_timeout_ms() -> u64 {
    10_000
}
