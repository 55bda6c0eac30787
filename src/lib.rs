//! Cafe API - a coffee REST resource with container health probes
//! 
//! This library provides CRUD endpoints over coffees backed by a pluggable
//! repository, plus readiness and startup checks for container orchestration.

pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod repository;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
