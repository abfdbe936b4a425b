//! Shared error type across pagesize crates.

use thiserror::Error;

/// Stable error codes, used in logs and asserted on by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Site list missing or unreadable.
    SiteListRead,
    /// Site list parsed to zero URLs.
    EmptySiteList,
    /// Invalid configuration document or value.
    BadConfig,
    /// Metrics listener could not bind.
    BindFailed,
    /// Request failed before a response arrived (connect, timeout, transport).
    Request,
    /// Response arrived but the body could not be read.
    BodyRead,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SiteListRead => "SITE_LIST_READ",
            ErrorCode::EmptySiteList => "EMPTY_SITE_LIST",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::BindFailed => "BIND_FAILED",
            ErrorCode::Request => "REQUEST",
            ErrorCode::BodyRead => "BODY_READ",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PageSizeError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum PageSizeError {
    #[error("failed to read site list {path}: {reason}")]
    SiteListRead { path: String, reason: String },
    #[error("no URLs found in {0}")]
    EmptySiteList(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("failed to bind {addr}: {reason}")]
    BindFailed { addr: String, reason: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("body read failed: {0}")]
    BodyRead(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PageSizeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PageSizeError::SiteListRead { .. } => ErrorCode::SiteListRead,
            PageSizeError::EmptySiteList(_) => ErrorCode::EmptySiteList,
            PageSizeError::BadConfig(_) => ErrorCode::BadConfig,
            PageSizeError::BindFailed { .. } => ErrorCode::BindFailed,
            PageSizeError::Request(_) => ErrorCode::Request,
            PageSizeError::BodyRead(_) => ErrorCode::BodyRead,
            PageSizeError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Per-check failures are recovered in the poll loop; everything else is
    /// a startup error.
    pub fn is_check_failure(&self) -> bool {
        matches!(self, PageSizeError::Request(_) | PageSizeError::BodyRead(_))
    }
}
