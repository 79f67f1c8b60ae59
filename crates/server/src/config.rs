//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Maintenance service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Service name used in structured log fields
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// HTTP port for the API, health and metrics endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Synthesize sensor readings when a prediction request carries
    /// none. Legacy behavior; off by default.
    #[serde(default)]
    pub simulate_if_missing: bool,

    /// Seed the in-memory store with demo equipment on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Maximum records returned by history and event listings
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_service_name() -> String {
    "maintenance-service".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

impl ServerConfig {
    /// Load configuration from MAINTENANCE_-prefixed environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("MAINTENANCE"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            service_name: default_service_name(),
            api_port: default_api_port(),
            simulate_if_missing: false,
            seed_demo_data: default_seed_demo_data(),
            history_limit: default_history_limit(),
        }))
    }
}
