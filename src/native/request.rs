//! Framework-native request.

use std::ops::Deref;

use bytes::Bytes;
use http::Uri;

use crate::core::{Error, Result};
use crate::types::{ParamList, Parameters};

use super::{Cookie, Headers};

/// Methods accepted when custom methods are not allowed.
const STANDARD_METHODS: &[&str] = &[
    "OPTIONS", "GET", "HEAD", "POST", "PUT", "DELETE", "TRACE", "CONNECT", "PATCH", "PROPFIND",
];

// =============================================================================
// Capabilities
// =============================================================================

/// Read access to a native request, as needed by the adapters.
pub trait NativeRequest {
    fn method(&self) -> &str;
    fn uri(&self) -> &Uri;
    fn request_uri(&self) -> &str;
    fn version(&self) -> &str;
    fn headers(&self) -> &Headers;
    fn query(&self) -> &Parameters;
    fn post(&self) -> &Parameters;
    fn files(&self) -> &Parameters;
    fn content(&self) -> Option<&Bytes>;

    /// Full URI as a string, fragment included.
    fn uri_string(&self) -> String {
        self.uri().to_string()
    }

    /// Parsed `Cookie` header, if any.
    fn cookie(&self) -> Option<Cookie> {
        self.headers().cookie()
    }

    /// Server/environment parameters, for request types that carry them.
    fn server_params(&self) -> Option<&dyn HasServerParams> {
        None
    }
}

/// Request types exposing a server parameter collection (`$_SERVER`).
pub trait HasServerParams {
    fn server(&self) -> &ParamList;

    /// Server parameter by name.
    fn server_param(&self, name: &str) -> Option<&str> {
        self.server()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// Request
// =============================================================================

/// Native request. Built once through [`RequestBuilder`].
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    request_uri: String,
    uri: Uri,
    /// URI as given; keeps the fragment `Uri` drops.
    uri_text: String,
    version: String,
    headers: Headers,
    query: Parameters,
    post: Parameters,
    files: Parameters,
    content: Option<Bytes>,
}

impl Request {
    /// Create a request builder.
    #[inline]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Routing target (path, query and fragment).
    #[inline]
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Full URI text, fragment included.
    #[inline]
    pub fn uri_text(&self) -> &str {
        &self.uri_text
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[inline]
    pub fn query(&self) -> &Parameters {
        &self.query
    }

    #[inline]
    pub fn post(&self) -> &Parameters {
        &self.post
    }

    #[inline]
    pub fn files(&self) -> &Parameters {
        &self.files
    }

    /// Raw body; `None` when never set.
    #[inline]
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    #[inline]
    pub fn cookie(&self) -> Option<Cookie> {
        self.headers.cookie()
    }
}

impl NativeRequest for Request {
    fn method(&self) -> &str {
        Request::method(self)
    }

    fn uri(&self) -> &Uri {
        Request::uri(self)
    }

    fn uri_string(&self) -> String {
        self.uri_text.clone()
    }

    fn request_uri(&self) -> &str {
        Request::request_uri(self)
    }

    fn version(&self) -> &str {
        Request::version(self)
    }

    fn headers(&self) -> &Headers {
        Request::headers(self)
    }

    fn query(&self) -> &Parameters {
        Request::query(self)
    }

    fn post(&self) -> &Parameters {
        Request::post(self)
    }

    fn files(&self) -> &Parameters {
        Request::files(self)
    }

    fn content(&self) -> Option<&Bytes> {
        Request::content(self)
    }
}

// =============================================================================
// Environment-aware Request
// =============================================================================

/// Native request carrying an explicit server parameter collection.
///
/// The collection is stored as given; nothing is derived from it.
#[derive(Debug, Clone)]
pub struct EnvRequest {
    request: Request,
    server: ParamList,
}

impl EnvRequest {
    #[inline]
    pub fn new(request: Request, server: ParamList) -> Self {
        Self { request, server }
    }

    #[inline]
    pub fn request(&self) -> &Request {
        &self.request
    }

    #[inline]
    pub fn into_request(self) -> Request {
        self.request
    }

    #[inline]
    pub fn server(&self) -> &ParamList {
        &self.server
    }
}

impl Deref for EnvRequest {
    type Target = Request;

    fn deref(&self) -> &Request {
        &self.request
    }
}

impl HasServerParams for EnvRequest {
    fn server(&self) -> &ParamList {
        &self.server
    }
}

impl NativeRequest for EnvRequest {
    fn method(&self) -> &str {
        self.request.method()
    }

    fn uri(&self) -> &Uri {
        self.request.uri()
    }

    fn uri_string(&self) -> String {
        self.request.uri_text().to_string()
    }

    fn request_uri(&self) -> &str {
        self.request.request_uri()
    }

    fn version(&self) -> &str {
        self.request.version()
    }

    fn headers(&self) -> &Headers {
        self.request.headers()
    }

    fn query(&self) -> &Parameters {
        self.request.query()
    }

    fn post(&self) -> &Parameters {
        self.request.post()
    }

    fn files(&self) -> &Parameters {
        self.request.files()
    }

    fn content(&self) -> Option<&Bytes> {
        self.request.content()
    }

    fn server_params(&self) -> Option<&dyn HasServerParams> {
        Some(self)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Request`].
///
/// Collects every field first and validates once in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<String>,
    allow_custom_methods: bool,
    request_uri: Option<String>,
    uri: Option<String>,
    version: Option<String>,
    headers: Headers,
    header_lines: Vec<(String, String)>,
    query: Parameters,
    post: Parameters,
    files: Parameters,
    content: Option<Bytes>,
}

impl RequestBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method token (default `GET`).
    #[inline]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Accept method tokens outside the standard set.
    #[inline]
    pub fn allow_custom_methods(mut self, allow: bool) -> Self {
        self.allow_custom_methods = allow;
        self
    }

    /// Set the routing target. Defaults to the URI's path and query.
    #[inline]
    pub fn request_uri(mut self, request_uri: impl Into<String>) -> Self {
        self.request_uri = Some(request_uri.into());
        self
    }

    /// Set the full URI (default `/`).
    #[inline]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the protocol version (default `1.1`).
    #[inline]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Replace the header collection.
    #[inline]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Add one header line; validated on build.
    #[inline]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_lines.push((name.into(), value.into()));
        self
    }

    #[inline]
    pub fn query(mut self, query: Parameters) -> Self {
        self.query = query;
        self
    }

    #[inline]
    pub fn post(mut self, post: Parameters) -> Self {
        self.post = post;
        self
    }

    #[inline]
    pub fn files(mut self, files: Parameters) -> Self {
        self.files = files;
        self
    }

    #[inline]
    pub fn content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<Request> {
        let method = self.method.unwrap_or_else(|| "GET".to_string());
        if !self.allow_custom_methods && !STANDARD_METHODS.contains(&method.as_str()) {
            return Err(Error::InvalidMethod(method));
        }

        let uri_text = self.uri.unwrap_or_else(|| "/".to_string());
        let uri: Uri = uri_text.parse()?;

        let request_uri = self.request_uri.unwrap_or_else(|| {
            let mut target = uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string());
            if let Some(pos) = uri_text.find('#') {
                target.push_str(&uri_text[pos..]);
            }
            target
        });

        let mut headers = self.headers;
        for (name, value) in &self.header_lines {
            headers.add_header_line(name, value)?;
        }

        Ok(Request {
            method,
            request_uri,
            uri,
            uri_text,
            version: self.version.unwrap_or_else(|| "1.1".to_string()),
            headers,
            query: self.query,
            post: self.post,
            files: self.files,
            content: self.content,
        })
    }
}
