//! pagesize-exporter
//!
//! Polls the URLs in `sites.txt`, records each response body size, and serves
//! the latest sizes on `/metrics`.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use pagesize_core::error::Result;
use pagesize_exporter::{config, Exporter};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    Exporter::build(cfg)?.run().await
}
