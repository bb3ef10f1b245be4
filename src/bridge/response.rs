//! Response conversion.
//!
//! Buffered bodies (`php://memory`, `php://temp`) are materialized into a
//! raw response and parsed back; file-backed bodies are handed over as an
//! open read handle so large files are never loaded.

use http::HeaderMap;

use crate::core::Result;
use crate::native::{self, Headers};
use crate::psr7::{self, header_value_text, Stream};

/// Convert a PSR-7 response to a native response.
pub fn to_native(response: &psr7::Response) -> Result<native::Response> {
    let body = response.body();
    tracing::debug!(
        status = response.status().as_u16(),
        storage = %body.metadata_uri(),
        "to_native: converting response"
    );

    if body.storage().is_buffered() {
        let head = format!(
            "HTTP/{} {} {}\r\n{}\r\n",
            response.protocol_version(),
            response.status().as_u16(),
            response.reason_phrase(),
            headers_to_string(response.headers())
        );
        let content = body.contents()?;

        let mut raw = Vec::with_capacity(head.len() + content.len());
        raw.extend_from_slice(head.as_bytes());
        raw.extend_from_slice(&content);
        return native::Response::from_raw(&raw);
    }

    let mut headers = Headers::new();
    for name in response.headers().keys() {
        headers.add_header_line(name.as_str(), &joined_values(response.headers(), name))?;
    }

    Ok(native::Response::streaming(
        response.protocol_version(),
        response.status(),
        response.reason_phrase(),
        headers,
        body.open_read()?,
    ))
}

/// Convert a native response to a PSR-7 response with a `php://temp` body.
pub fn from_native(response: &native::Response) -> Result<psr7::Response> {
    tracing::debug!(
        status = response.status().as_u16(),
        streamed = response.is_stream(),
        "from_native: converting response"
    );

    let mut body = Stream::temp();
    body.write(&response.body_bytes()?)?;

    let mut headers = HeaderMap::with_capacity(response.headers().len());
    for (name, value) in response.headers().iter() {
        psr7::append_header(&mut headers, name, value)?;
    }

    Ok(psr7::Response::new(body, response.status().as_u16(), headers)?
        .with_status(response.status().as_u16(), response.reason_phrase())?
        .with_protocol_version(response.version()))
}

/// Header block with one `Name: v1, v2\r\n` line per header name.
pub fn headers_to_string(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for name in headers.keys() {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&joined_values(headers, name));
        out.push_str("\r\n");
    }
    out
}

#[inline]
fn joined_values(headers: &HeaderMap, name: &http::header::HeaderName) -> String {
    headers
        .get_all(name)
        .iter()
        .map(header_value_text)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::io::{Read, Write};

    fn psr_response(body: Stream, status: u16) -> psr7::Response {
        psr7::Response::new(body, status, HeaderMap::new())
            .unwrap()
            .with_added_header("Content-Type", "text/html")
            .unwrap()
    }

    #[test]
    fn test_headers_to_string() {
        let mut headers = HeaderMap::new();
        psr7::append_header(&mut headers, "Content-Type", "text/html; level=1").unwrap();
        psr7::append_header(&mut headers, "Content-Type", "text/html").unwrap();
        psr7::append_header(&mut headers, "X-Foo", "bar").unwrap();

        assert_eq!(
            headers_to_string(&headers),
            "content-type: text/html; level=1, text/html\r\nx-foo: bar\r\n"
        );
        assert_eq!(headers_to_string(&HeaderMap::new()), "");
    }

    #[test]
    fn test_temp_body_is_materialized() {
        let mut body = Stream::temp();
        body.write(b"Test!").unwrap();

        let native = to_native(&psr_response(body, 200)).unwrap();
        assert!(!native.is_stream());
        assert_eq!(native.status(), StatusCode::OK);
        assert_eq!(native.reason_phrase(), "OK");
        assert_eq!(native.version(), "1.1");
        assert_eq!(native.headers().get("content-type"), Some("text/html"));
        assert_eq!(native.body_bytes().unwrap().as_ref(), b"Test!");
    }

    #[test]
    fn test_memory_body_is_materialized() {
        let native = to_native(&psr_response(Stream::from_bytes("in memory"), 200)).unwrap();
        assert!(!native.is_stream());
        assert_eq!(native.body_bytes().unwrap().as_ref(), b"in memory");
    }

    #[test]
    fn test_empty_body_no_content() {
        let response = psr7::Response::new(Stream::temp(), 204, HeaderMap::new()).unwrap();
        let native = to_native(&response).unwrap();

        assert_eq!(native.status(), StatusCode::NO_CONTENT);
        assert_eq!(native.reason_phrase(), "No Content");
        assert!(native.headers().is_empty());
        assert!(native.body_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_multi_value_header_joined() {
        let response = psr7::Response::new(Stream::temp(), 200, HeaderMap::new())
            .unwrap()
            .with_added_header("Content-Type", "text/html; level=1")
            .unwrap()
            .with_added_header("Content-Type", "text/html")
            .unwrap();

        let native = to_native(&response).unwrap();
        assert_eq!(
            native.headers().get_all("content-type"),
            vec!["text/html; level=1, text/html"]
        );
    }

    #[test]
    fn test_file_body_is_streamed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file content").unwrap();

        let response = psr_response(Stream::from_path(file.path()), 200)
            .with_status(206, "Partial")
            .unwrap();
        let native = to_native(&response).unwrap();

        assert!(native.is_stream());
        assert_eq!(native.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(native.reason_phrase(), "Partial");
        assert_eq!(native.headers().get("content-type"), Some("text/html"));

        let mut streamed = String::new();
        let mut handle = native.stream().unwrap();
        handle.read_to_string(&mut streamed).unwrap();
        assert_eq!(streamed, "file content");
    }

    #[test]
    fn test_missing_file_body_fails() {
        let dir = tempfile::tempdir().unwrap();
        let response = psr_response(Stream::from_path(dir.path().join("missing")), 200);
        assert!(to_native(&response).is_err());
    }

    #[test]
    fn test_from_native() {
        let cases = [
            ("HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\n\r\nTest!", 200, "Test!"),
            ("HTTP/1.1 204 No Content\r\n\r\n", 204, ""),
            ("HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nX-Foo: bar\r\n\r\n", 200, ""),
            ("HTTP/1.0 404 Not Found\r\nContent-Length: 9\r\n\r\nNot found", 404, "Not found"),
        ];

        for (raw, status, body) in cases {
            let native = native::Response::from_string(raw).unwrap();
            let psr = from_native(&native).unwrap();

            assert_eq!(psr.status().as_u16(), status, "{}", raw);
            assert_eq!(psr.reason_phrase(), native.reason_phrase());
            assert_eq!(psr.protocol_version(), native.version());
            assert_eq!(psr.body().contents().unwrap().as_ref(), body.as_bytes());
            assert_eq!(psr.body().metadata_uri(), "php://temp");
            for (name, values) in native.headers().to_map() {
                assert_eq!(psr.header(&name), values, "{}", name);
            }
        }
    }

    #[test]
    fn test_from_native_streamed_body_is_read() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"streamed").unwrap();
        let native = native::Response::streaming("1.1", StatusCode::OK, "OK", Headers::new(), file);

        let psr = from_native(&native).unwrap();
        assert_eq!(psr.body().contents().unwrap().as_ref(), b"streamed");
    }

    #[test]
    fn test_set_cookie_with_domain() {
        let response = psr7::Response::new(Stream::temp(), 200, HeaderMap::new())
            .unwrap()
            .with_header("Set-Cookie", "foo=bar; domain=example.com")
            .unwrap();

        let native = to_native(&response).unwrap();
        assert_eq!(
            native.headers().get("set-cookie"),
            Some("foo=bar; domain=example.com")
        );
    }
}
