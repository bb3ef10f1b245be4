//! Immutable response.

use http::{HeaderMap, StatusCode};

use crate::core::{Error, Result};

use super::{append_header, header_line, header_values, replace_header, Stream};

/// HTTP response with a body stream.
#[derive(Debug, Clone)]
pub struct Response {
    version: String,
    status: StatusCode,
    reason: String,
    headers: HeaderMap,
    body: Stream,
}

impl Response {
    /// Create a response. The reason phrase defaults to the canonical one.
    pub fn new(body: Stream, status: u16, headers: HeaderMap) -> Result<Self> {
        let status = parse_status(status)?;
        Ok(Self {
            version: "1.1".to_string(),
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }

    // Getters

    #[inline]
    pub fn protocol_version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn reason_phrase(&self) -> &str {
        &self.reason
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// All values of a header (case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Vec<String> {
        header_values(&self.headers, name)
    }

    /// Header values joined with `", "`.
    #[inline]
    pub fn header_line(&self, name: &str) -> Option<String> {
        header_line(&self.headers, name)
    }

    #[inline]
    pub fn body(&self) -> &Stream {
        &self.body
    }

    // Modifiers

    /// Set the status; an empty reason selects the canonical phrase.
    pub fn with_status(mut self, status: u16, reason: &str) -> Result<Self> {
        self.status = parse_status(status)?;
        self.reason = if reason.is_empty() {
            self.status.canonical_reason().unwrap_or_default().to_string()
        } else {
            reason.to_string()
        };
        Ok(self)
    }

    #[inline]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set a header, replacing previous values.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        replace_header(&mut self.headers, name, value)?;
        Ok(self)
    }

    /// Append a header value.
    pub fn with_added_header(mut self, name: &str, value: &str) -> Result<Self> {
        append_header(&mut self.headers, name, value)?;
        Ok(self)
    }

    #[inline]
    pub fn with_body(mut self, body: Stream) -> Self {
        self.body = body;
        self
    }
}

#[inline]
fn parse_status(status: u16) -> Result<StatusCode> {
    StatusCode::from_u16(status).map_err(|_| Error::InvalidStatus(status))
}
