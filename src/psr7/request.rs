//! Immutable server request.

use http::{HeaderMap, Method, Uri};

use crate::core::Result;
use crate::types::{ParamList, Parameters};

use super::{append_header, header_line, header_values, replace_header, Stream, UploadedFiles};

/// Server-side HTTP request.
///
/// Clone is derived so callers can keep an original around; the `with_*`
/// methods themselves take `self` by value and never copy.
#[derive(Debug, Clone)]
pub struct ServerRequest {
    method: Method,
    uri: Uri,
    /// URI as given; keeps the fragment `Uri` drops.
    uri_text: String,
    version: String,
    headers: HeaderMap,
    cookie_params: ParamList,
    query_params: Parameters,
    parsed_body: Option<Parameters>,
    uploaded_files: UploadedFiles,
    server_params: ParamList,
    body: Stream,
}

impl ServerRequest {
    /// Create a request from a method token and a URI string.
    ///
    /// Any valid method token is accepted, including extension methods.
    pub fn new(method: &str, uri: &str) -> Result<Self> {
        Ok(Self {
            method: Method::from_bytes(method.as_bytes())?,
            uri: uri.parse()?,
            uri_text: uri.to_string(),
            version: "1.1".to_string(),
            headers: HeaderMap::new(),
            cookie_params: ParamList::new(),
            query_params: Parameters::new(),
            parsed_body: None,
            uploaded_files: UploadedFiles::new(),
            server_params: ParamList::new(),
            body: Stream::memory(),
        })
    }

    // Getters

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
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
    pub fn protocol_version(&self) -> &str {
        &self.version
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
    pub fn cookie_params(&self) -> &ParamList {
        &self.cookie_params
    }

    #[inline]
    pub fn query_params(&self) -> &Parameters {
        &self.query_params
    }

    #[inline]
    pub fn parsed_body(&self) -> Option<&Parameters> {
        self.parsed_body.as_ref()
    }

    #[inline]
    pub fn uploaded_files(&self) -> &UploadedFiles {
        &self.uploaded_files
    }

    #[inline]
    pub fn server_params(&self) -> &ParamList {
        &self.server_params
    }

    #[inline]
    pub fn body(&self) -> &Stream {
        &self.body
    }

    // Modifiers

    #[inline]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri_text = uri.to_string();
        self.uri = uri;
        self
    }

    #[inline]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replace the whole header map.
    #[inline]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
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
    pub fn with_cookie_params(mut self, cookies: ParamList) -> Self {
        self.cookie_params = cookies;
        self
    }

    #[inline]
    pub fn with_query_params(mut self, query: Parameters) -> Self {
        self.query_params = query;
        self
    }

    #[inline]
    pub fn with_parsed_body(mut self, body: Parameters) -> Self {
        self.parsed_body = Some(body);
        self
    }

    #[inline]
    pub fn with_uploaded_files(mut self, files: UploadedFiles) -> Self {
        self.uploaded_files = files;
        self
    }

    #[inline]
    pub fn with_server_params(mut self, server: ParamList) -> Self {
        self.server_params = server;
        self
    }

    #[inline]
    pub fn with_body(mut self, body: Stream) -> Self {
        self.body = body;
        self
    }
}
