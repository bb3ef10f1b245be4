//! psr7_bridge - Conversions between PSR-7 style messages and native
//! framework messages.
//!
//! The crate carries two message models and the adapters between them:
//!
//! - [`psr7`] - immutable server request, response, streams and uploads
//! - [`native`] - mutable, builder-constructed request and raw-text response
//! - [`bridge`] - request, response and uploaded file conversions
//!
//! # Features
//!
//! - **Shallow requests**: route on method, URI and headers without copying
//!   the body or uploads
//! - **Streamed responses**: file-backed bodies are passed as open handles,
//!   buffered bodies go through the raw response text
//! - **Upload trees**: nested and indexed uploads map to and from native
//!   `$_FILES` arrays, including PHP's parallel-array layout
//! - **Structured logging**: JSON lines through `tracing`
//!
//! # Example
//!
//! ```rust,ignore
//! use psr7_bridge::bridge;
//! use psr7_bridge::psr7::ServerRequest;
//!
//! let request = ServerRequest::new("GET", "https://example.com/foo?bar=baz")?;
//! let native = bridge::request::to_native(&request, true)?;
//! assert_eq!(native.request_uri(), "/foo?bar=baz");
//!
//! let back = bridge::request::from_native(&native)?;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bridge;
pub mod config;
pub mod core;
pub mod logging;
pub mod native;
pub mod psr7;
pub mod types;

// Re-exports for convenience
pub use config::{BridgeConfig, Config};
pub use core::{Error, Result};
