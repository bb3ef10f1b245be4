//! Line-based header collection and the `Cookie` header.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::core::{Error, Result};
use crate::types::ParamList;

/// Characters escaped in cookie values.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'\\');

// =============================================================================
// Headers
// =============================================================================

/// Ordered collection of header lines.
///
/// Names keep the case they were added with; lookups ignore case. A name
/// may appear on several lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    lines: Vec<(String, String)>,
}

impl Headers {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `Name: value` lines (CRLF or LF separated).
    pub fn from_string(raw: &str) -> Result<Self> {
        let mut headers = Self::new();
        for line in raw.split('\n') {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::InvalidHeader(format!("missing ':' in {:?}", line)))?;
            headers.add_header_line(name.trim(), value.trim())?;
        }
        Ok(headers)
    }

    /// Append one header line.
    pub fn add_header_line(&mut self, name: &str, value: &str) -> Result<()> {
        if !is_token(name) {
            return Err(Error::InvalidHeader(format!("invalid header name {:?}", name)));
        }
        if value.contains(|c: char| c == '\r' || c == '\n') {
            return Err(Error::InvalidHeader(format!(
                "line break in value of {}",
                name
            )));
        }
        self.lines.push((name.to_string(), value.to_string()));
        Ok(())
    }

    /// Append a `Cookie` line carrying `cookie`.
    pub fn add_cookie(&mut self, cookie: &Cookie) {
        self.lines.push(("Cookie".to_string(), cookie.field_value()));
    }

    /// First value of a header (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of a header, one per line.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate `(name, value)` lines in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Group lines by name: name (as first seen) to values in line order.
    pub fn to_map(&self) -> Vec<(String, Vec<String>)> {
        let mut map: Vec<(String, Vec<String>)> = Vec::new();
        for (name, value) in &self.lines {
            match map.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
                Some((_, values)) => values.push(value.clone()),
                None => map.push((name.clone(), vec![value.clone()])),
            }
        }
        map
    }

    /// Parsed `Cookie` header; all `Cookie` lines are merged.
    ///
    /// Returns `None` when there is no `Cookie` line or nothing in it parses.
    pub fn cookie(&self) -> Option<Cookie> {
        let values = self.get_all("cookie");
        if values.is_empty() {
            return None;
        }
        Cookie::parse(&values.join("; "))
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.lines {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        Ok(())
    }
}

/// RFC 9110 token check for header names.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

// =============================================================================
// Cookie
// =============================================================================

/// Request cookies carried by a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    pairs: ParamList,
}

impl Cookie {
    #[inline]
    pub fn new(pairs: ParamList) -> Self {
        Self { pairs }
    }

    /// Parse a `Cookie` header value (`a=1; b=2`), percent-decoding values.
    ///
    /// Segments without `=` or with an empty name are skipped; `None` means
    /// no pair could be read at all.
    pub fn parse(header: &str) -> Option<Self> {
        let mut pairs = ParamList::with_capacity((header.matches(';').count() + 1).min(16));

        for cookie in header.split(';') {
            let cookie = cookie.trim();
            if cookie.is_empty() {
                continue;
            }

            let (name, value) = match cookie.split_once('=') {
                Some((name, value)) => (name.trim(), value.trim()),
                None => continue,
            };

            if !name.is_empty() {
                let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
                pairs.push((name.to_string(), value));
            }
        }

        if pairs.is_empty() {
            None
        } else {
            Some(Self { pairs })
        }
    }

    /// Value of a cookie by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn pairs(&self) -> &ParamList {
        &self.pairs
    }

    #[inline]
    pub fn into_pairs(self) -> ParamList {
        self.pairs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialized header value.
    pub fn field_value(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, utf8_percent_encode(value, COOKIE_VALUE)))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
