//! Health checks backing the orchestration probes
//!
//! Every check is re-evaluated from scratch on each call and reports either
//! UP or DOWN. Failures never propagate out of a check.

pub mod readiness;
pub mod startup;

use std::collections::BTreeMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use readiness::ReadinessCheck;
pub use startup::{StartupCheck, STARTUP_CPU_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy { Self::Up } else { Self::Down }
    }

    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

/// Outcome of a single named check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub name: String,
    pub status: HealthStatus,
    /// Diagnostic details, never used to decide the status
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl HealthCheckResponse {
    pub fn named(name: impl Into<String>, healthy: bool) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::from_healthy(healthy),
            data: BTreeMap::new(),
        }
    }

    pub fn up(name: impl Into<String>) -> Self {
        Self::named(name, true)
    }

    pub fn down(name: impl Into<String>) -> Self {
        Self::named(name, false)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.data.insert(key.into(), value.to_string());
        self
    }
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;

    async fn call(&self) -> HealthCheckResponse;
}

/// Build a check name from the unqualified name of `T` and a fixed suffix,
/// e.g. `"CafeResource Readiness Check"`.
pub fn check_name<T: ?Sized>(suffix: &str) -> String {
    let full = std::any::type_name::<T>();
    let short = full.rsplit("::").next().unwrap_or(full);
    format!("{} {}", short, suffix)
}
