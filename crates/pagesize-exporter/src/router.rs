//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(ops::METRICS_PATH, get(ops::metrics))
        .route(ops::HEALTH_PATH, get(ops::healthz))
        .with_state(state)
}
