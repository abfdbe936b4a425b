//! Listener setup and serving.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use pagesize_core::error::{PageSizeError, Result};

/// Bind the metrics listener. Failure here is fatal at startup.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| PageSizeError::BindFailed {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
}

/// Serve until the server fails; there is no graceful shutdown path.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .await
        .map_err(|e| PageSizeError::Internal(format!("server failed: {e}")))
}
