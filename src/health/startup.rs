//! Startup check driven by system CPU load

use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::{check_name, HealthCheck, HealthCheckResponse};
use crate::{api::CafeResource, services::CpuLoadSource};

/// The process counts as started once system CPU load drops strictly below this fraction
pub const STARTUP_CPU_THRESHOLD: f64 = 0.95;

pub struct StartupCheck {
    name: String,
    cpu: Arc<dyn CpuLoadSource>,
    allow_unknown_load: bool,
}

impl StartupCheck {
    /// `allow_unknown_load` decides the outcome when the CPU source cannot produce a sample
    pub fn new(cpu: Arc<dyn CpuLoadSource>, allow_unknown_load: bool) -> Self {
        Self {
            name: check_name::<CafeResource>("Startup Check"),
            cpu,
            allow_unknown_load,
        }
    }

    pub fn is_started(&self, load: f64) -> bool {
        if load.is_nan() || load < 0.0 {
            return self.allow_unknown_load;
        }
        load < STARTUP_CPU_THRESHOLD
    }
}

#[async_trait]
impl HealthCheck for StartupCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self) -> HealthCheckResponse {
        let load = self.cpu.system_cpu_load();
        let started = self.is_started(load);
        if load.is_nan() || load < 0.0 {
            warn!("{}: CPU load unavailable, reporting started={}", self.name, started);
            return HealthCheckResponse::named(&self.name, started).with_data("cpu_load", "unavailable");
        }

        debug!("{}: CPU load {:.3}, started={}", self.name, load, started);
        HealthCheckResponse::named(&self.name, started).with_data("cpu_load", format!("{:.3}", load))
    }
}
