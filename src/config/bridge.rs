//! Bridge configuration.

use super::parse::env_bool;
use super::ConfigError;

/// Default conversion mode for the adapters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Convert requests without body, post parameters and uploads
    /// (BRIDGE_SHALLOW).
    pub shallow: bool,
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            shallow: env_bool("BRIDGE_SHALLOW", false)?,
        })
    }
}
