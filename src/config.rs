//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::api::{CafeResource, REST_ROOT};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "cafe-api")]
#[command(about = "A coffee REST resource with container readiness and startup probes")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "9080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// URL the readiness check fetches [default: http://localhost:<port>/rest/coffees]
    #[arg(long)]
    pub readiness_url: Option<String>,

    /// Readiness check request timeout in seconds
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    pub readiness_timeout: u64,

    /// Report the startup check as UP when system CPU load cannot be read
    #[arg(long)]
    pub startup_allow_unknown_cpu: bool,

    /// Serve Prometheus metrics on /metrics
    #[arg(long)]
    pub metrics: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Target of the readiness self-check
    pub fn readiness_url(&self) -> String {
        self.readiness_url.clone().unwrap_or_else(|| {
            format!("http://localhost:{}{}{}", self.port, REST_ROOT, CafeResource::PATH)
        })
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
