//! Readiness check that calls the service's own coffee list endpoint

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use tracing::{debug, warn};

use super::{check_name, HealthCheck, HealthCheckResponse};
use crate::api::CafeResource;

/// Reports UP only when a GET against `url` answers 200. Any other status,
/// timeout or transport error reports DOWN.
pub struct ReadinessCheck {
    name: String,
    url: String,
    client: Client,
}

impl ReadinessCheck {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: check_name::<CafeResource>("Readiness Check"),
            url: url.into(),
            client,
        })
    }

    async fn probe(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        Ok(response.status())
    }
}

#[async_trait]
impl HealthCheck for ReadinessCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self) -> HealthCheckResponse {
        match self.probe().await {
            Ok(StatusCode::OK) => {
                debug!("{}: {} answered 200", self.name, self.url);
                HealthCheckResponse::up(&self.name)
            }
            Ok(status) => {
                warn!("{}: {} answered {}", self.name, self.url, status);
                HealthCheckResponse::down(&self.name).with_data("status", status.as_u16())
            }
            Err(e) => {
                warn!("{}: request to {} failed: {}", self.name, self.url, e);
                HealthCheckResponse::down(&self.name).with_data("error", e)
            }
        }
    }
}
