//! Environment-based server configuration.

use sdm_core::{MemoryConfig, MemoryStore};
use std::env;
use std::sync::Arc;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bit width of every stored address and datum.
    pub address_size: usize,
    /// Number of hard locations in the memory.
    pub num_locations: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("SDM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SDM_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5080),
            address_size: env::var("SDM_ADDRESS_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            num_locations: env::var("SDM_NUM_LOCATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }

    /// Get server bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub memory: Arc<MemoryStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, sdm_core::MemoryError> {
        let memory = MemoryStore::new(MemoryConfig::new(
            config.address_size,
            config.num_locations,
        ))?;
        Ok(Self {
            config: Arc::new(config),
            memory: Arc::new(memory),
        })
    }
}
