//! Server request conversion in both directions.

use crate::helpers::*;
use psr7_bridge::bridge::request::{from_native, to_native, to_native_with};
use psr7_bridge::native::{self, EnvRequest, HasServerParams, NativeRequest};
use psr7_bridge::psr7::{ServerRequest, Stream, UploadNode, UploadedFiles};
use psr7_bridge::BridgeConfig;

const URI: &str = "https://example.com/foo/bar?baz=bat";

fn full_request() -> ServerRequest {
    let mut uploads = UploadedFiles::new();
    uploads.insert(
        "avatar",
        UploadNode::File(uploaded("/tmp/php1234", "me.png", "image/png", 2048)),
    );

    ServerRequest::new("POST", URI)
        .unwrap()
        .with_added_header("Host", "example.com")
        .unwrap()
        .with_added_header("Accept", "text/html")
        .unwrap()
        .with_added_header("Accept", "application/xhtml+xml")
        .unwrap()
        .with_cookie_params(vec![("session".into(), "a b;c".into())])
        .with_query_params(params(&[("baz", "bat")]))
        .with_parsed_body(params(&[("name", "Alice")]))
        .with_uploaded_files(uploads)
        .with_server_params(vec![("REMOTE_ADDR".into(), "10.0.0.1".into())])
        .with_body(Stream::from_bytes("name=Alice"))
}

/// Routing fields survive regardless of the conversion mode
#[test]
fn test_routing_fields_independent_of_mode() {
    let request = full_request();
    let shallow = to_native(&request, true).unwrap();
    let full = to_native(&request, false).unwrap();

    for native in [&shallow, &full] {
        assert_eq!(native.method(), "POST");
        assert_eq!(native.request_uri(), "/foo/bar?baz=bat");
        assert_eq!(native.uri().to_string(), URI);
        assert_eq!(native.headers().get_all("accept").len(), 2);
        assert_eq!(native.server_param("REMOTE_ADDR"), Some("10.0.0.1"));
        assert_field(native.query(), "baz", "bat");
    }

    assert!(shallow.content().is_none());
    assert!(shallow.post().is_empty());
    assert!(shallow.files().is_empty());

    assert_eq!(full.content().unwrap().as_ref(), b"name=Alice");
    assert_field(full.post(), "name", "Alice");
    let avatar = full.files().get("avatar").unwrap().as_map().unwrap();
    assert_field(avatar, "tmp_name", "/tmp/php1234");
    assert_field(avatar, "size", "2048");
}

/// Full round trip keeps every field
#[test]
fn test_full_round_trip() {
    let request = full_request();
    let back = from_native(&to_native(&request, false).unwrap()).unwrap();

    assert_eq!(back.method(), request.method());
    assert_eq!(back.uri(), request.uri());
    assert_eq!(back.protocol_version(), "1.1");
    assert_eq!(back.query_params(), request.query_params());
    assert_eq!(back.parsed_body(), request.parsed_body());
    assert_eq!(back.server_params(), request.server_params());
    assert_eq!(back.cookie_params(), request.cookie_params());
    assert_eq!(back.body().contents().unwrap().as_ref(), b"name=Alice");
    assert_eq!(back.header("accept"), vec!["text/html", "application/xhtml+xml"]);

    let avatar = back.uploaded_files().get("avatar").unwrap().as_file().unwrap();
    assert_eq!(avatar.client_filename(), Some("me.png"));
    assert_eq!(avatar.client_media_type(), Some("image/png"));
    assert_eq!(avatar.size(), Some(2048));
    assert_eq!(avatar.storage_uri(), "/tmp/php1234");
}

/// Config chooses the conversion mode
#[test]
fn test_config_selects_mode() {
    let request = full_request();
    let native = to_native_with(&request, &BridgeConfig { shallow: true }).unwrap();
    assert!(native.content().is_none());

    let native = to_native_with(&request, &BridgeConfig::default()).unwrap();
    assert!(native.content().is_some());
}

/// Native requests without a server collection give empty server params
#[test]
fn test_plain_native_request_has_no_server_params() {
    let request = native::Request::builder()
        .method("PUT")
        .uri("http://localhost/items/7")
        .version("2")
        .header("X-Request-Id", "abc")
        .build()
        .unwrap();

    let psr = from_native(&request).unwrap();
    assert!(psr.server_params().is_empty());
    assert_eq!(psr.protocol_version(), "2");
    assert_eq!(psr.header_line("x-request-id").as_deref(), Some("abc"));
    assert!(psr.cookie_params().is_empty());
    assert!(psr.body().contents().unwrap().is_empty());

    let env = EnvRequest::new(request, vec![("REMOTE_ADDR".into(), "127.0.0.1".into())]);
    let psr = from_native(&env).unwrap();
    assert_eq!(
        psr.server_params(),
        &vec![("REMOTE_ADDR".to_string(), "127.0.0.1".to_string())]
    );
}

/// Methods outside the standard set pass through both ways
#[test]
fn test_custom_method_round_trip() {
    let request = ServerRequest::new("CUSTOM_METHOD", "/hook").unwrap();
    let native = to_native(&request, false).unwrap();
    assert_eq!(NativeRequest::method(&native), "CUSTOM_METHOD");

    let back = from_native(&native).unwrap();
    assert_eq!(back.method().as_str(), "CUSTOM_METHOD");
}

/// Fragments are kept in the routing target and the full URI
#[test]
fn test_fragment_round_trip() {
    let uri = "https://example.com/foo?a=1#frag";
    let request = ServerRequest::new("GET", uri).unwrap();

    let native = to_native(&request, false).unwrap();
    assert_eq!(native.request_uri(), "/foo?a=1#frag");
    assert_eq!(native.uri_string(), uri);

    let back = from_native(&native).unwrap();
    assert_eq!(back.uri_text(), uri);
}
