//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::{HealthCheckResponse, HealthStatus};

/// Error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// Aggregate of one or more health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// UP only when every check is UP
    pub status: HealthStatus,
    pub checks: Vec<HealthCheckResponse>,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn from_checks(checks: Vec<HealthCheckResponse>) -> Self {
        let healthy = checks.iter().all(|check| check.status.is_up());
        Self {
            status: HealthStatus::from_healthy(healthy),
            checks,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for HealthReport {
    /// 200 when UP, 503 when DOWN, with each check in the body
    fn into_response(self) -> Response {
        let status = match self.status {
            HealthStatus::Up => StatusCode::OK,
            HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_down_check_makes_the_report_down() {
        let report = HealthReport::from_checks(vec![
            HealthCheckResponse::up("a"),
            HealthCheckResponse::down("b"),
        ]);
        assert_eq!(report.status, HealthStatus::Down);
        assert_eq!(report.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn empty_report_is_up() {
        let report = HealthReport::from_checks(Vec::new());
        assert_eq!(report.status, HealthStatus::Up);
        assert_eq!(report.into_response().status(), StatusCode::OK);
    }
}
