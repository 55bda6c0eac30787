//! HTTP API module
//! 
//! This module contains the route table, endpoint handlers and response structures.

pub mod handlers;
pub mod health;
pub mod negotiation;
pub mod responses;

use std::{future::ready, sync::Arc};
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{metrics::track_metrics, state::AppState};

pub use handlers::CafeResource;

/// Prefix under which REST resources are mounted
pub const REST_ROOT: &str = "/rest";

/// Create the HTTP router with all endpoints.
///
/// When a Prometheus handle is given, `/metrics` is served and every request is measured.
pub fn create_router(state: Arc<AppState>, metrics: Option<PrometheusHandle>) -> Router {
    let router = Router::new()
        .nest(REST_ROOT, CafeResource::routes())
        .merge(health::routes())
        .with_state(state);

    let router = match metrics {
        Some(handle) => router
            .route("/metrics", get(move || ready(handle.render())))
            .layer(middleware::from_fn(track_metrics)),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
