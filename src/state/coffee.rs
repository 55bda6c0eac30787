//! Coffee entity and create payload

use serde::{Deserialize, Serialize};

/// A persisted coffee. The identifier is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Payload accepted when creating a coffee.
///
/// Unknown fields, including any client-supplied `id`, are dropped during
/// deserialization so the repository always assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCoffee {
    pub name: String,
    pub price: f64,
}

impl NewCoffee {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Check the payload before it reaches the repository
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be blank".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        Ok(())
    }

    /// Attach a repository-assigned identifier
    pub fn into_coffee(self, id: i64) -> Coffee {
        Coffee {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
        }
    }
}
