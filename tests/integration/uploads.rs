//! Uploaded file trees through the request adapter.

use crate::helpers::*;
use psr7_bridge::bridge::files::{native_to_uploads, uploads_to_native};
use psr7_bridge::bridge::request::from_native;
use psr7_bridge::native;
use psr7_bridge::psr7::{UploadError, UploadNode, UploadedFile, UploadedFiles};
use psr7_bridge::types::{ParamValue, Parameters};

/// Successful leaf keeps its storage path
#[test]
fn test_success_leaf_record() {
    let mut uploads = UploadedFiles::new();
    uploads.insert("foo", UploadNode::File(uploaded("/tmp/abc", "foo.txt", "text/plain", 100)));

    let native = uploads_to_native(&uploads);
    let record = native.get("foo").unwrap().as_map().unwrap();
    assert_eq!(record, &native_record("foo.txt", "text/plain", 100, "/tmp/abc", 0));
}

/// Errored leaf never exposes a storage path
#[test]
fn test_error_leaf_record() {
    let mut uploads = UploadedFiles::new();
    uploads.insert(
        "foo",
        UploadNode::File(UploadedFile::new("/tmp/abc", Some(0), UploadError::NoFile)),
    );

    let native = uploads_to_native(&uploads);
    let record = native.get("foo").unwrap().as_map().unwrap();
    assert_field(record, "tmp_name", "");
    assert_field(record, "error", "4");
}

/// Indexed uploads under one name keep index order
#[test]
fn test_indexed_uploads_from_native_request() {
    let file = temp_file_with(b"report");
    let path = file.path().to_string_lossy().into_owned();

    let mut indexed = Parameters::new();
    indexed.insert("1", ParamValue::from(native_record("b.txt", "text/plain", 6, &path, 0)));
    indexed.insert("0", ParamValue::from(native_record("", "", 0, "", 4)));
    let mut files = Parameters::new();
    files.insert("foo-bar", ParamValue::from(indexed));

    let request = native::Request::builder()
        .method("POST")
        .uri("/upload")
        .files(files)
        .build()
        .unwrap();
    let psr = from_native(&request).unwrap();

    let leaves = psr.uploaded_files().get("foo-bar").unwrap().as_indexed().unwrap();
    assert_eq!(leaves.len(), 2);

    let first = leaves[0].as_file().unwrap();
    assert_eq!(first.error(), UploadError::NoFile);
    assert!(first.stream().is_err());

    let second = leaves[1].as_file().unwrap();
    assert_eq!(second.error(), UploadError::Ok);
    assert_eq!(second.client_filename(), Some("b.txt"));
    assert_eq!(second.stream().unwrap().contents().unwrap().as_ref(), b"report");
}

/// PHP's parallel-array layout is transposed into indexed leaves
#[test]
fn test_parallel_arrays_transposed() {
    let list = |values: &[ParamValue]| -> ParamValue {
        let map: Parameters = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect();
        ParamValue::from(map)
    };

    let mut record = Parameters::new();
    record.insert("name", list(&["a.txt".into(), "b.txt".into()]));
    record.insert("type", list(&["text/plain".into(), "text/csv".into()]));
    record.insert("size", list(&[1i64.into(), 2i64.into()]));
    record.insert("tmp_name", list(&["/tmp/a".into(), "/tmp/b".into()]));
    record.insert("error", list(&[0i64.into(), 0i64.into()]));
    let mut files = Parameters::new();
    files.insert("docs", ParamValue::from(record));

    let uploads = native_to_uploads(&files).unwrap();
    let leaves = uploads.get("docs").unwrap().as_indexed().unwrap();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[1].as_file().unwrap().client_media_type(), Some("text/csv"));
    assert_eq!(leaves[1].as_file().unwrap().storage_uri(), "/tmp/b");
}

/// Empty trees convert to empty trees in both directions
#[test]
fn test_empty_trees() {
    assert!(uploads_to_native(&UploadedFiles::new()).is_empty());
    assert!(native_to_uploads(&Parameters::new()).unwrap().is_empty());
}

/// Fields named like record keys stay a nesting level
#[test]
fn test_record_key_field_names_round_trip() {
    let mut doc = UploadedFiles::new();
    doc.insert("name", UploadNode::File(uploaded("/tmp/n", "n.txt", "text/plain", 1)));
    doc.insert(
        "error",
        UploadNode::File(UploadedFile::new("/tmp/e", Some(0), UploadError::Partial)),
    );
    let mut uploads = UploadedFiles::new();
    uploads.insert("doc", UploadNode::Named(doc));

    let back = native_to_uploads(&uploads_to_native(&uploads)).unwrap();
    let doc = back.get("doc").unwrap().as_named().unwrap();
    assert_eq!(doc.get("name").unwrap().as_file().unwrap().storage_uri(), "/tmp/n");
    assert_eq!(
        doc.get("error").unwrap().as_file().unwrap().error(),
        UploadError::Partial
    );
}

/// Raw PHP arrays for `doc[name]` and `doc[error]` inputs
#[test]
fn test_raw_record_key_field_names() {
    let by_field = |name: ParamValue, error: ParamValue| -> ParamValue {
        let mut map = Parameters::new();
        map.insert("name", name);
        map.insert("error", error);
        ParamValue::from(map)
    };

    let mut record = Parameters::new();
    record.insert("name", by_field("n.txt".into(), "".into()));
    record.insert("tmp_name", by_field("/tmp/n".into(), "".into()));
    record.insert("error", by_field(0i64.into(), 4i64.into()));
    let mut files = Parameters::new();
    files.insert("doc", ParamValue::from(record));

    let request = native::Request::builder()
        .method("POST")
        .files(files)
        .build()
        .unwrap();
    let psr = from_native(&request).unwrap();

    let doc = psr.uploaded_files().get("doc").unwrap().as_named().unwrap();
    let name = doc.get("name").unwrap().as_file().unwrap();
    assert_eq!(name.client_filename(), Some("n.txt"));
    assert_eq!(name.storage_uri(), "/tmp/n");
    assert_eq!(
        doc.get("error").unwrap().as_file().unwrap().error(),
        UploadError::NoFile
    );
}

/// Records missing optional fields still convert
#[test]
fn test_partial_record() {
    let mut record = Parameters::new();
    record.insert("tmp_name", ParamValue::from("/tmp/partial"));
    record.insert("error", ParamValue::from("0"));
    let mut files = Parameters::new();
    files.insert("f", ParamValue::from(record));

    let uploads = native_to_uploads(&files).unwrap();
    let file = uploads.get("f").unwrap().as_file().unwrap();
    assert_eq!(file.client_filename(), None);
    assert_eq!(file.size(), None);
    assert_eq!(file.storage_uri(), "/tmp/partial");
}
