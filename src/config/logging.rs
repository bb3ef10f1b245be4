//! Logging configuration.

use super::parse::env_or;
use super::ConfigError;

/// Log filter used when neither LOG_LEVEL nor RUST_LOG is set.
const DEFAULT_FILTER: &str = "psr7_bridge=info";

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            service_name: "psr7_bridge".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// Priority: LOG_LEVEL > RUST_LOG > default
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error
    /// RUST_LOG accepts full tracing filter syntax: psr7_bridge=debug,other=warn
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_name = env_or("SERVICE_NAME", "psr7_bridge");
        if service_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "SERVICE_NAME".into(),
                message: "must not be empty".into(),
            });
        }

        Ok(Self {
            filter: Self::resolve_log_filter(),
            service_name,
        })
    }

    /// Resolve log filter from environment.
    fn resolve_log_filter() -> String {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            let level = level.to_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {
                    return format!("psr7_bridge={}", level);
                }
                _ => {
                    // Subscriber is not installed yet.
                    eprintln!(
                        "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                        level
                    );
                }
            }
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }

        DEFAULT_FILTER.to_string()
    }
}
