//! Invocation counters and the Prometheus exporter

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::IntoResponse,
};
use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const LIST_INVOCATIONS: &str = "coffees_list_invocations_total";
pub const LIST_INVOCATIONS_DESCRIPTION: &str = "Counts the number of times the coffee list is read";

/// Process-lifetime counter that is both exported through the `metrics`
/// facade and readable in-process.
///
/// Register it after the recorder is installed, otherwise the exported handle
/// is a no-op. The in-process count is unaffected either way.
#[derive(Clone)]
pub struct InvocationCounter {
    name: &'static str,
    count: Arc<AtomicU64>,
    handle: metrics::Counter,
}

impl InvocationCounter {
    pub fn register(name: &'static str, description: &'static str) -> Self {
        metrics::describe_counter!(name, Unit::Count, description);
        Self {
            name,
            count: Arc::new(AtomicU64::new(0)),
            handle: metrics::counter!(name),
        }
    }

    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.handle.increment(1);
    }

    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    const EXPONENTIAL_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(EXPONENTIAL_SECONDS)?
        .install_recorder()
}

/// Middleware recording request count and latency per method, route and status
pub async fn track_metrics(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();

    let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
        matched_path.as_str().to_owned()
    } else {
        req.uri().path().to_owned()
    };
    let method = req.method().clone();

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];

    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_requests_duration_seconds", &labels).record(latency);

    response
}
