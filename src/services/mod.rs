//! Host services consumed by the health checks
//!
//! This module wraps operating-system facilities like CPU load reporting.

pub mod system;

// Re-export main types
pub use system::*;
