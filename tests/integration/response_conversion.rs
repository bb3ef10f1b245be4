//! Response conversion and body storage dispatch.

use std::io::Read;

use crate::helpers::*;
use http::{HeaderMap, StatusCode};
use psr7_bridge::bridge::response::{from_native, to_native};
use psr7_bridge::native;
use psr7_bridge::psr7::{Response, Stream};

/// Buffered bodies are materialized into the native response
#[test]
fn test_buffered_bodies_materialized() {
    for stream in [Stream::temp(), Stream::memory()] {
        let mut body = stream;
        body.write(b"<h1>Hello</h1>").unwrap();

        let response = Response::new(body, 200, HeaderMap::new())
            .unwrap()
            .with_header("Content-Type", "text/html")
            .unwrap();
        let converted = to_native(&response).unwrap();

        assert!(!converted.is_stream());
        assert_eq!(converted.body_bytes().unwrap().as_ref(), b"<h1>Hello</h1>");
        assert_eq!(converted.headers().get("content-type"), Some("text/html"));
    }
}

/// File bodies are streamed from an open handle
#[test]
fn test_large_file_body_streamed() {
    let content = vec![b'x'; 256 * 1024];
    let file = temp_file_with(&content);

    let response = Response::new(Stream::from_path(file.path()), 200, HeaderMap::new())
        .unwrap()
        .with_header("Content-Type", "application/octet-stream")
        .unwrap();
    let streamed = to_native(&response).unwrap();

    assert!(streamed.is_stream());
    assert!(matches!(streamed.body(), native::ResponseBody::Stream(_)));

    let mut read = Vec::new();
    streamed.stream().unwrap().read_to_end(&mut read).unwrap();
    assert_eq!(read.len(), content.len());
}

/// Native to PSR-7 and back keeps status, reason and headers
#[test]
fn test_native_round_trip() {
    let raw = "HTTP/1.1 201 Created\r\nLocation: /items/7\r\nX-Foo: bar\r\n\r\n{\"id\":7}";
    let parsed = native::Response::from_string(raw).unwrap();

    let psr = from_native(&parsed).unwrap();
    assert_eq!(psr.status(), StatusCode::CREATED);
    assert_eq!(psr.reason_phrase(), "Created");
    assert_eq!(psr.header_line("location").as_deref(), Some("/items/7"));

    let again = to_native(&psr).unwrap();
    assert_eq!(again.status(), StatusCode::CREATED);
    assert_eq!(again.reason_phrase(), "Created");
    assert_eq!(again.headers().get("x-foo"), Some("bar"));
    assert_eq!(again.body_bytes().unwrap().as_ref(), b"{\"id\":7}");
}
