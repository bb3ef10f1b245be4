//! Immutable PSR-7 style message model.
//!
//! Messages are never mutated in place: every `with_*` method consumes the
//! message and returns the modified copy.
//!
//! - [`ServerRequest`] - server-side request with parsed parameters and uploads
//! - [`Response`] - response with status, reason phrase and body stream
//! - [`Stream`] - body byte source tagged with its storage location
//! - [`UploadedFile`] / [`UploadNode`] - uploaded file tree
//!
//! # Example
//!
//! ```rust,ignore
//! use psr7_bridge::psr7::{ServerRequest, Stream};
//!
//! let request = ServerRequest::new("PATCH", "https://example.com/foo")?
//!     .with_added_header("X-Foo", "bar")?
//!     .with_body(Stream::from_bytes("payload"));
//! ```

mod request;
mod response;
mod stream;
mod upload;

pub use request::ServerRequest;
pub use response::Response;
pub use stream::{Stream, StreamStorage};
pub use upload::{UploadError, UploadNode, UploadSource, UploadedFile, UploadedFiles};

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;

use crate::core::Result;

/// Header value as text. Non UTF-8 bytes are replaced rather than rejected.
#[inline]
pub(crate) fn header_value_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

/// All values of a header, in insertion order.
pub(crate) fn header_values(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers.get_all(name).iter().map(header_value_text).collect()
}

/// Values of a header joined with `", "`, or `None` when absent.
pub(crate) fn header_line(headers: &HeaderMap, name: &str) -> Option<String> {
    let values = header_values(headers, name);
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Parse and append one header value.
pub(crate) fn append_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(name.as_bytes())?;
    let value = HeaderValue::from_str(value)?;
    headers.append(name, value);
    Ok(())
}

/// Parse and set one header value, dropping previous values.
pub(crate) fn replace_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(name.as_bytes())?;
    let value = HeaderValue::from_str(value)?;
    headers.insert(name, value);
    Ok(())
}
