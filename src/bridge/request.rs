//! Server request conversion.

use http::HeaderMap;

use crate::config::BridgeConfig;
use crate::core::Result;
use crate::native::{self, Cookie, EnvRequest, Headers, NativeRequest};
use crate::psr7::{self, header_value_text, ServerRequest, Stream};

use super::files;

/// Convert a PSR-7 server request to a native request.
///
/// A `shallow` conversion keeps the routing metadata (method, URIs,
/// headers, cookies, query and server parameters) and leaves the body,
/// post parameters and uploaded files empty.
pub fn to_native(request: &ServerRequest, shallow: bool) -> Result<EnvRequest> {
    tracing::debug!(
        method = %request.method(),
        uri = %request.uri(),
        shallow = shallow,
        "to_native: converting server request"
    );

    let mut headers = Headers::new();
    for (name, value) in request.headers() {
        headers.add_header_line(name.as_str(), &header_value_text(value))?;
    }
    if !request.cookie_params().is_empty() {
        headers.add_cookie(&Cookie::new(request.cookie_params().clone()));
    }

    let mut builder = native::Request::builder()
        .allow_custom_methods(true)
        .method(request.method().as_str())
        .request_uri(request_target(request.uri_text()))
        .uri(request.uri_text())
        .version(request.protocol_version())
        .headers(headers)
        .query(request.query_params().clone());

    if !shallow {
        let files = files::uploads_to_native(request.uploaded_files());
        tracing::trace!(files = files.len(), "to_native: converted uploaded files");

        builder = builder
            .post(request.parsed_body().cloned().unwrap_or_default())
            .files(files)
            .content(request.body().contents()?);
    }

    Ok(EnvRequest::new(
        builder.build()?,
        request.server_params().clone(),
    ))
}

/// Convert using the conversion mode from `config`.
#[inline]
pub fn to_native_with(request: &ServerRequest, config: &BridgeConfig) -> Result<EnvRequest> {
    to_native(request, config.shallow)
}

/// Convert a native request to a PSR-7 server request.
///
/// Server parameters are copied only from request types that expose a
/// server collection; otherwise the result has none.
pub fn from_native<R>(request: &R) -> Result<ServerRequest>
where
    R: NativeRequest + ?Sized,
{
    tracing::debug!(
        method = request.method(),
        uri = %request.uri(),
        "from_native: converting native request"
    );

    let mut body = Stream::memory();
    if let Some(content) = request.content() {
        body.write(content)?;
    }

    let mut headers = HeaderMap::with_capacity(request.headers().len());
    for (name, value) in request.headers().iter() {
        psr7::append_header(&mut headers, name, value)?;
    }

    let server = request
        .server_params()
        .map(|params| params.server().clone())
        .unwrap_or_default();

    let uploads = files::native_to_uploads(request.files())?;

    let mut converted = ServerRequest::new(request.method(), &request.uri_string())?
        .with_protocol_version(request.version())
        .with_headers(headers)
        .with_body(body)
        .with_server_params(server)
        .with_uploaded_files(uploads)
        .with_query_params(request.query().clone());

    match request.cookie() {
        Some(cookie) => converted = converted.with_cookie_params(cookie.into_pairs()),
        None => tracing::trace!("from_native: no parsable Cookie header"),
    }

    Ok(converted.with_parsed_body(request.post().clone()))
}

/// Routing target for a URI: the URI text with `scheme://authority` removed.
///
/// Path, query and fragment are kept. URIs without scheme and authority are
/// returned as they are.
pub fn request_target(uri: &str) -> String {
    let target = match uri.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty() && !scheme.contains(|c: char| matches!(c, '/' | '?' | '#')) =>
        {
            let end = rest
                .find(|c: char| matches!(c, '/' | '?' | '#'))
                .unwrap_or(rest.len());
            &rest[end..]
        }
        _ => uri,
    };

    if target.is_empty() {
        "/".to_string()
    } else {
        target.to_string()
    }
}
