//! Single-URL page size check.
//!
//! A check never fails from the caller's point of view: fetch errors are
//! logged and recorded as a zero reading so a stale value never survives an
//! outage.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use pagesize_core::error::{ErrorCode, PageSizeError, Result};

use crate::obs::ExporterMetrics;

/// What a successful fetch produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body_len: usize,
}

/// Fetches a page and reports its body length.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// `reqwest`-backed fetcher. One client is shared by every check so
/// connections are pooled across cycles.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// The timeout covers the whole exchange, body included.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageSizeError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PageSizeError::Request(e.to_string()))?;

        // Any status counts; an error page still has a size.
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| PageSizeError::BodyRead(e.to_string()))?;

        Ok(FetchedPage { status, body_len: body.len() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Ok { status: u16 },
    Failed(ErrorCode),
}

/// Outcome of one check, as recorded.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub url: String,
    /// Value written to the gauge.
    pub bytes: u64,
    pub result: CheckResult,
    pub elapsed: Duration,
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.result, CheckResult::Ok { .. })
    }
}

/// Fetch `url`, record its size (or 0 on failure), log, and return the outcome.
pub async fn check_page_size(
    fetcher: &dyn PageFetcher,
    metrics: &ExporterMetrics,
    url: &str,
) -> CheckOutcome {
    let started = Instant::now();
    let fetched = fetcher.fetch(url).await;
    let elapsed = started.elapsed();

    let (bytes, result) = match fetched {
        Ok(page) => {
            let bytes = page.body_len as u64;
            tracing::info!(%url, bytes, status = page.status, elapsed_ms = elapsed.as_millis() as u64, "fetched page");
            (bytes, CheckResult::Ok { status: page.status })
        }
        Err(e) => {
            tracing::warn!(%url, code = e.code().as_str(), error = %e, "page check failed");
            (0, CheckResult::Failed(e.code()))
        }
    };

    metrics.record_page_size(url, bytes as f64);
    let label = if matches!(result, CheckResult::Ok { .. }) { "ok" } else { "error" };
    metrics.checks.inc(&[("url", url), ("result", label)]);
    metrics.check_duration.observe(&[("url", url)], elapsed);

    CheckOutcome { url: url.to_string(), bytes, result, elapsed }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    struct Refusing;

    #[async_trait]
    impl PageFetcher for Refusing {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage> {
            Err(PageSizeError::Request("connection refused".into()))
        }
    }

    struct EmptyPage;

    #[async_trait]
    impl PageFetcher for EmptyPage {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage> {
            Ok(FetchedPage { status: 204, body_len: 0 })
        }
    }

    #[derive(Clone, Default)]
    struct LogBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failure_is_logged_and_recorded_as_zero() {
        let buf = LogBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let metrics = ExporterMetrics::new();
        metrics.record_page_size("http://down.example", 512.0);
        let outcome = check_page_size(&Refusing, &metrics, "http://down.example").await;

        assert_eq!(outcome.bytes, 0);
        assert_eq!(outcome.result, CheckResult::Failed(ErrorCode::Request));
        assert_eq!(metrics.page_size("http://down.example"), Some(0.0));

        let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("page check failed"), "{logged}");
        assert!(logged.contains("http://down.example"), "{logged}");
    }

    #[tokio::test]
    async fn empty_body_reads_as_zero_but_counts_as_ok() {
        let metrics = ExporterMetrics::new();
        let outcome = check_page_size(&EmptyPage, &metrics, "http://empty.example").await;

        assert!(outcome.is_ok());
        assert_eq!(metrics.page_size("http://empty.example"), Some(0.0));
        assert_eq!(metrics.checks.get(&[("url", "http://empty.example"), ("result", "ok")]), 1);
        assert_eq!(metrics.checks.get(&[("url", "http://empty.example"), ("result", "error")]), 0);
    }
}
