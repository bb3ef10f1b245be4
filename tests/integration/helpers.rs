//! Test helpers and utilities

use std::io::Write;

use psr7_bridge::psr7::{UploadError, UploadedFile};
use psr7_bridge::types::{ParamValue, Parameters};
use tempfile::NamedTempFile;

/// Parameters from `(key, value)` string pairs.
pub fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (*k, ParamValue::from(*v)))
        .collect()
}

/// Temporary file holding `content`; removed when dropped.
pub fn temp_file_with(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Successful upload stored at `path`.
pub fn uploaded(path: &str, name: &str, media_type: &str, size: u64) -> UploadedFile {
    UploadedFile::new(path, Some(size), UploadError::Ok)
        .with_client_filename(name)
        .with_client_media_type(media_type)
}

/// Native `$_FILES` record.
pub fn native_record(name: &str, media_type: &str, size: i64, tmp_name: &str, error: i64) -> Parameters {
    let mut record = Parameters::new();
    record.insert("name", ParamValue::from(name));
    record.insert("type", ParamValue::from(media_type));
    record.insert("size", ParamValue::from(size));
    record.insert("tmp_name", ParamValue::from(tmp_name));
    record.insert("error", ParamValue::from(error));
    record
}

/// Assert that a native map holds a string field with the expected text.
#[track_caller]
pub fn assert_field(map: &Parameters, key: &str, expected: &str) {
    let value = map
        .get(key)
        .unwrap_or_else(|| panic!("Field '{}' not found", key));
    assert_eq!(value.to_text().as_deref(), Some(expected), "Field '{}' mismatch", key);
}
