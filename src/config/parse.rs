//! Environment variable parsing utilities.

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable (None if empty or missing).
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Parse environment variable as boolean.
///
/// Accepts "1", "true", "yes", "on" and "0", "false", "no", "off"
/// (case-insensitive). Missing or empty means `default`.
pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::Parse {
            key: key.into(),
            value,
            error: "expected a boolean".into(),
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
