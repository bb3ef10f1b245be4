//! Conversions between the PSR-7 model and the native model.
//!
//! - [`request`] - server requests, optionally shallow
//! - [`response`] - responses, buffered or streamed by body storage
//! - [`files`] - uploaded file trees and native `$_FILES` arrays
//!
//! Every conversion is synchronous and allocates its own output; the input
//! message is never modified.

pub mod files;
pub mod request;
pub mod response;
