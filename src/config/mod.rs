//! Configuration module for psr7_bridge.
//!
//! This module provides centralized configuration loading from environment variables.
//! The adapters themselves never read the environment; callers load a
//! [`Config`] once and pass its parts along.
//!
//! # Example
//!
//! ```rust,ignore
//! use psr7_bridge::config::Config;
//!
//! let config = Config::from_env()?;
//! psr7_bridge::logging::init(&config.logging);
//! let native = psr7_bridge::bridge::request::to_native_with(&request, &config.bridge)?;
//! ```

mod bridge;
mod error;
mod logging;
mod parse;

pub use bridge::BridgeConfig;
pub use error::ConfigError;
pub use logging::LoggingConfig;

/// Complete application configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Conversion defaults.
    pub bridge: BridgeConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            logging: LoggingConfig::from_env()?,
            bridge: BridgeConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Service: {}", self.logging.service_name);
        info!("  Log filter: {}", self.logging.filter);
        info!(
            "  Request conversion: {}",
            if self.bridge.shallow { "shallow" } else { "full" }
        );
    }
}
