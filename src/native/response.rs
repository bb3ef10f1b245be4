//! Framework-native response.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::sync::LazyLock;

use bytes::Bytes;
use http::StatusCode;
use regex::Regex;

use crate::core::{Error, Result};

use super::Headers;

/// `HTTP/<version> <code>[ <reason>]`
static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^HTTP/(?P<version>\d(?:\.\d)?) (?P<status>\d{3})(?: (?P<reason>.*))?$")
        .expect("status line pattern is valid")
});

/// Response body: bytes in memory, or an open file streamed on demand.
#[derive(Debug)]
pub enum ResponseBody {
    Buffered(Bytes),
    Stream(File),
}

/// Native response.
///
/// Not `Clone`: a streamed body owns its file handle.
#[derive(Debug)]
pub struct Response {
    version: String,
    status: StatusCode,
    reason: String,
    headers: Headers,
    body: ResponseBody,
}

impl Response {
    /// Parse a complete response: status line, header lines, blank line, body.
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        let (head, body) = match find_subslice(raw, b"\r\n\r\n") {
            Some(pos) => (&raw[..pos], &raw[pos + 4..]),
            None => (raw, &[][..]),
        };

        let head = std::str::from_utf8(head)
            .map_err(|e| Error::MalformedResponse(format!("head is not UTF-8: {}", e)))?;
        let (status_line, header_block) = head.split_once("\r\n").unwrap_or((head, ""));

        let caps = STATUS_LINE
            .captures(status_line)
            .ok_or_else(|| Error::MalformedResponse(format!("bad status line {:?}", status_line)))?;

        let status = StatusCode::from_bytes(caps["status"].as_bytes())?;
        let reason = caps
            .name("reason")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        Ok(Self {
            version: caps["version"].to_string(),
            status,
            reason,
            headers: Headers::from_string(header_block)?,
            body: ResponseBody::Buffered(Bytes::copy_from_slice(body)),
        })
    }

    /// Parse a complete response given as text.
    #[inline]
    pub fn from_string(raw: &str) -> Result<Self> {
        Self::from_raw(raw.as_bytes())
    }

    /// Create a response whose body is read from `file` when needed.
    pub fn streaming(
        version: impl Into<String>,
        status: StatusCode,
        reason: impl Into<String>,
        headers: Headers,
        file: File,
    ) -> Self {
        Self {
            version: version.into(),
            status,
            reason: reason.into(),
            headers,
            body: ResponseBody::Stream(file),
        }
    }

    #[inline]
    pub fn version(&self) -> &str {
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
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[inline]
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self.body, ResponseBody::Stream(_))
    }

    /// Open file handle of a streamed body.
    #[inline]
    pub fn stream(&self) -> Option<&File> {
        match &self.body {
            ResponseBody::Stream(file) => Some(file),
            ResponseBody::Buffered(_) => None,
        }
    }

    /// Whole body. A streamed body is read from its start.
    pub fn body_bytes(&self) -> Result<Bytes> {
        match &self.body {
            ResponseBody::Buffered(bytes) => Ok(bytes.clone()),
            ResponseBody::Stream(file) => {
                let mut file = file;
                file.seek(SeekFrom::Start(0))?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)?;
                Ok(Bytes::from(buf))
            }
        }
    }

    /// Status line and headers, terminated by the blank line.
    pub fn head(&self) -> String {
        format!(
            "HTTP/{} {} {}\r\n{}\r\n",
            self.version,
            self.status.as_u16(),
            self.reason,
            self.headers
        )
    }
}

impl fmt::Display for Response {
    /// Head followed by the body when it is buffered.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.head())?;
        if let ResponseBody::Buffered(bytes) = &self.body {
            f.write_str(&String::from_utf8_lossy(bytes))?;
        }
        Ok(())
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
