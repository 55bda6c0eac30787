//! Health probe endpoints

use std::sync::Arc;
use axum::{extract::State, routing::get, Router};

use super::responses::HealthReport;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/health/started", get(startup_handler))
        .route("/health/live", get(liveness_handler))
}

/// Handle GET /health - All checks
pub async fn health_handler(State(state): State<Arc<AppState>>) -> HealthReport {
    let (ready, started) = tokio::join!(state.readiness.call(), state.startup.call());
    HealthReport::from_checks(vec![ready, started])
}

/// Handle GET /health/ready - Readiness probe
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> HealthReport {
    HealthReport::from_checks(vec![state.readiness.call().await])
}

/// Handle GET /health/started - Startup probe
pub async fn startup_handler(State(state): State<Arc<AppState>>) -> HealthReport {
    HealthReport::from_checks(vec![state.startup.call().await])
}

/// Handle GET /health/live - The process answers, so it is alive
pub async fn liveness_handler() -> HealthReport {
    HealthReport::from_checks(Vec::new())
}
