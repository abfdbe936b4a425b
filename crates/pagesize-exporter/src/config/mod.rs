//! Exporter config loader (strict parsing).
//!
//! The config file is optional: when it does not exist the exporter runs on
//! the built-in defaults. A file that exists but fails to parse or validate is
//! a startup error.

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use pagesize_core::error::{PageSizeError, Result};

pub use schema::{ExporterConfig, ExporterSection, PollSection, Schedule, SitesSection};

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pagesize.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        PageSizeError::BadConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(ExporterConfig::default())
        }
        Err(e) => Err(PageSizeError::BadConfig(format!(
            "stat config {} failed: {e}",
            path.display()
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| PageSizeError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
