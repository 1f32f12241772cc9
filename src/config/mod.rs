//! Configuration management for the gateway
//!
//! Configuration loads from a YAML file with serde defaults for every field,
//! plus environment overrides for deployment secrets. Every load path runs
//! `validate()` before the config is used.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::config(format!("Failed to read config file: {e}")))?;

        let mut gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::config(format!("Failed to parse config: {e}")))?;
        gateway.apply_env_overrides();

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Built-in defaults with environment overrides only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment");

        let mut gateway = GatewayConfig::default();
        gateway.apply_env_overrides();

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.gateway.validate()
    }
}
