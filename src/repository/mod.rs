//! Coffee persistence
//!
//! The HTTP layer only talks to the [`CoffeeRepository`] trait. The concrete
//! store is chosen once in `main` and handed to [`crate::state::AppState`].

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::{Coffee, NewCoffee};

pub use memory::InMemoryCoffeeRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("coffee store unavailable: {0}")]
    Unavailable(String),
}

/// Create, read, list and delete operations on coffees.
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    /// All coffees ordered by identifier
    async fn list_all(&self) -> Result<Vec<Coffee>, RepositoryError>;

    /// Persist a new coffee and return it with its assigned identifier
    async fn create(&self, coffee: NewCoffee) -> Result<Coffee, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Coffee>, RepositoryError>;

    /// Remove a coffee if it exists. Returns whether a record was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}
