//! Core error types.

use std::fmt;

/// Errors raised while constructing, reading or converting messages.
#[derive(Debug)]
pub enum Error {
    /// Method token rejected by a request that does not allow custom methods.
    InvalidMethod(String),

    /// URI could not be parsed.
    InvalidUri(String),

    /// Header name or value is not representable.
    InvalidHeader(String),

    /// Status code outside 100..=999.
    InvalidStatus(u16),

    /// Upload description is inconsistent (e.g. unknown error code).
    InvalidUpload(String),

    /// Stream requested from an upload that failed.
    UploadUnavailable {
        error: u8,
    },

    /// Raw response string does not follow `HTTP/x.y CODE REASON`.
    MalformedResponse(String),

    /// I/O error.
    Io(std::io::Error),

    /// HTTP error.
    Http(http::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMethod(m) => write!(f, "invalid HTTP method: {}", m),
            Error::InvalidUri(msg) => write!(f, "invalid URI: {}", msg),
            Error::InvalidHeader(msg) => write!(f, "invalid header: {}", msg),
            Error::InvalidStatus(code) => write!(f, "invalid status code: {}", code),
            Error::InvalidUpload(msg) => write!(f, "invalid upload: {}", msg),
            Error::UploadUnavailable { error } => {
                write!(f, "cannot retrieve stream due to upload error {}", error)
            }
            Error::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Http(e) => write!(f, "HTTP error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::Http(e)
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(e: http::uri::InvalidUri) -> Self {
        Error::InvalidUri(e.to_string())
    }
}

impl From<http::method::InvalidMethod> for Error {
    fn from(e: http::method::InvalidMethod) -> Self {
        Error::InvalidMethod(e.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(e: http::header::InvalidHeaderName) -> Self {
        Error::InvalidHeader(e.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeader(e.to_string())
    }
}

impl From<http::status::InvalidStatusCode> for Error {
    fn from(e: http::status::InvalidStatusCode) -> Self {
        Error::MalformedResponse(e.to_string())
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
