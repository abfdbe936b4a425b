//! Site list loader.
//!
//! Format: one URL per line. Surrounding whitespace is trimmed; blank lines and
//! lines whose trimmed form starts with `#` are skipped. Order is preserved.

use std::fs;
use std::path::Path;

use crate::error::{PageSizeError, Result};

/// Comment marker, checked against the trimmed line.
pub const COMMENT_PREFIX: char = '#';

/// Default site list location, relative to the working directory.
pub const DEFAULT_SITES_FILE: &str = "sites.txt";

/// Parse a site list. Never fails; an empty result is for the caller to judge.
pub fn parse_sites(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Read and parse a site list, rejecting a list with no URLs.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PageSizeError::SiteListRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let sites = parse_sites(&text);
    if sites.is_empty() {
        return Err(PageSizeError::EmptySiteList(path.display().to_string()));
    }
    tracing::debug!(path = %path.display(), count = sites.len(), "site list loaded");
    Ok(sites)
}
