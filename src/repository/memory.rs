//! Process-local coffee store

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Mutex, MutexGuard,
    },
};
use async_trait::async_trait;
use tracing::debug;

use super::{CoffeeRepository, RepositoryError};
use crate::state::{Coffee, NewCoffee};

/// Coffee repository backed by an ordered map. Identifiers start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryCoffeeRepository {
    coffees: Mutex<BTreeMap<i64, Coffee>>,
    next_id: AtomicI64,
}

impl InMemoryCoffeeRepository {
    pub fn new() -> Self {
        Self {
            coffees: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<i64, Coffee>>, RepositoryError> {
        self.coffees
            .lock()
            .map_err(|e| RepositoryError::Unavailable(format!("Failed to lock coffee store: {}", e)))
    }
}

impl Default for InMemoryCoffeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoffeeRepository for InMemoryCoffeeRepository {
    async fn list_all(&self) -> Result<Vec<Coffee>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn create(&self, coffee: NewCoffee) -> Result<Coffee, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let coffee = coffee.into_coffee(id);
        self.lock()?.insert(id, coffee.clone());
        debug!("Stored coffee {}", id);
        Ok(coffee)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Coffee>, RepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let removed = self.lock()?.remove(&id).is_some();
        debug!("Delete coffee {}: removed={}", id, removed);
        Ok(removed)
    }
}
