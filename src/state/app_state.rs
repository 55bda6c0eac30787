//! Main application state shared by all handlers

use std::sync::Arc;
use tracing::info;

use super::{Coffee, NewCoffee};
use crate::{
    error::ApiError,
    health::HealthCheck,
    metrics::InvocationCounter,
    repository::CoffeeRepository,
};

/// Collaborators resolved once at startup and shared by every request
pub struct AppState {
    /// Coffee persistence
    pub repository: Arc<dyn CoffeeRepository>,
    /// Counts list reads
    pub list_invocations: InvocationCounter,
    /// Probe checks
    pub readiness: Arc<dyn HealthCheck>,
    pub startup: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn CoffeeRepository>,
        list_invocations: InvocationCounter,
        readiness: Arc<dyn HealthCheck>,
        startup: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            repository,
            list_invocations,
            readiness,
            startup,
        }
    }

    /// List every coffee, counting the invocation
    pub async fn list_coffees(&self) -> Result<Vec<Coffee>, ApiError> {
        self.list_invocations.increment();
        Ok(self.repository.list_all().await?)
    }

    pub async fn create_coffee(&self, coffee: NewCoffee) -> Result<Coffee, ApiError> {
        coffee.validate().map_err(ApiError::Validation)?;
        let coffee = self.repository.create(coffee).await?;
        info!("Created coffee {} ({})", coffee.id, coffee.name);
        Ok(coffee)
    }

    pub async fn get_coffee(&self, id: i64) -> Result<Coffee, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(id))
    }

    /// Delete a coffee if it exists; a missing id is not an error
    pub async fn delete_coffee(&self, id: i64) -> Result<(), ApiError> {
        if self.repository.delete_by_id(id).await? {
            info!("Deleted coffee {}", id);
        }
        Ok(())
    }
}
