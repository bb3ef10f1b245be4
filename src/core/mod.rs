//! Core types shared by both message models and the adapters.
//!
//! - [`Error`] - errors raised by message constructors and body streams
//! - [`Result`] - result alias over [`Error`]

mod error;

pub use error::{Error, Result};
