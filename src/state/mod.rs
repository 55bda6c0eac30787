//! State management module
//! 
//! This module contains the coffee entity and the shared application state.

pub mod coffee;
pub mod app_state;

// Re-export main types
pub use coffee::{Coffee, NewCoffee};
pub use app_state::AppState;
