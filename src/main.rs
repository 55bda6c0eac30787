//! Cafe API - a coffee REST resource with container health probes
//!
//! This is the main entry point for the cafe-api server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use cafe_api::{
    api::create_router,
    config::Config,
    health::{ReadinessCheck, StartupCheck},
    metrics::{setup_metrics_recorder, InvocationCounter, LIST_INVOCATIONS, LIST_INVOCATIONS_DESCRIPTION},
    repository::InMemoryCoffeeRepository,
    services::{check_cpu_load_available, ProcStatCpuLoad},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("cafe_api={},tower_http=info", config.log_level()))
        .init();

    info!("Starting cafe-api server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, readiness_url={}, metrics={}",
          config.host, config.port, config.readiness_url(), config.metrics);

    // The recorder must exist before counters are registered against it
    let metrics_handle = if config.metrics {
        Some(setup_metrics_recorder()?)
    } else {
        None
    };
    let list_invocations = InvocationCounter::register(LIST_INVOCATIONS, LIST_INVOCATIONS_DESCRIPTION);

    let cpu = Arc::new(ProcStatCpuLoad::new());
    if let Err(e) = check_cpu_load_available(cpu.as_ref()) {
        warn!("{}; startup check will report {}", e,
              if config.startup_allow_unknown_cpu { "UP" } else { "DOWN" });
    }

    let readiness = ReadinessCheck::new(config.readiness_url(), config.readiness_timeout())?;
    let startup = StartupCheck::new(cpu, config.startup_allow_unknown_cpu);

    // Create application state
    let state = Arc::new(AppState::new(
        Arc::new(InMemoryCoffeeRepository::new()),
        list_invocations,
        Arc::new(readiness),
        Arc::new(startup),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state, metrics_handle);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /rest/coffees      - List coffees");
    info!("  POST   /rest/coffees      - Create a coffee");
    info!("  GET    /rest/coffees/:id  - Get a coffee");
    info!("  DELETE /rest/coffees/:id  - Delete a coffee");
    info!("  GET    /health            - All health checks");
    info!("  GET    /health/ready      - Readiness check");
    info!("  GET    /health/started    - Startup check");
    info!("  GET    /health/live       - Liveness check");
    if config.metrics {
        info!("  GET    /metrics           - Prometheus metrics");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
