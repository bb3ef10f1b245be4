//! Uploaded file tree conversion.
//!
//! The PSR-7 side is a tagged tree ([`UploadNode`]). The native side is a
//! `$_FILES` shaped parameter tree, where a file record is a map with the
//! keys `name`, `type`, `size`, `tmp_name` and `error`, and anything else is
//! a further nesting level. Three native layouts are understood:
//!
//! ```text
//! files[doc]              = {name, type, size, tmp_name, error}         one record
//! files[doc][a]           = {name, type, size, tmp_name, error}         normalized nesting
//! files[doc]              = {name: {0: .., 1: ..}, type: {0: .., ..}}   parallel arrays (raw PHP)
//! ```
//!
//! A record only needs `error`; missing fields read as empty. Fields that
//! are themselves called `name`, `error`, ... are told apart from parallel
//! arrays by the `error` branch, which holds only codes in the latter.
//!
//! Nesting levels whose keys are all integers become [`UploadNode::Indexed`]
//! in ascending index order; other levels become [`UploadNode::Named`].

use crate::core::{Error, Result};
use crate::psr7::{UploadError, UploadNode, UploadedFile, UploadedFiles};
use crate::types::{ParamValue, Parameters};

/// Keys of a native file record.
const RECORD_KEYS: [&str; 5] = ["name", "type", "size", "tmp_name", "error"];

// =============================================================================
// PSR-7 -> native
// =============================================================================

/// Convert an upload tree to a `$_FILES` shaped parameter tree.
pub fn uploads_to_native(uploads: &UploadedFiles) -> Parameters {
    uploads
        .iter()
        .map(|(name, node)| (name, node_to_native(node)))
        .collect()
}

fn node_to_native(node: &UploadNode) -> ParamValue {
    match node {
        UploadNode::File(file) => ParamValue::Map(file_record(file)),
        UploadNode::Named(children) => ParamValue::Map(uploads_to_native(children)),
        UploadNode::Indexed(children) => ParamValue::Map(
            children
                .iter()
                .enumerate()
                .map(|(index, child)| (index.to_string(), node_to_native(child)))
                .collect(),
        ),
    }
}

/// Native record for one file. `tmp_name` is only filled for successful uploads.
pub fn file_record(file: &UploadedFile) -> Parameters {
    let tmp_name = if file.error().is_ok() {
        file.storage_uri().into_owned()
    } else {
        String::new()
    };

    let mut record = Parameters::with_capacity(RECORD_KEYS.len());
    record.insert("name", ParamValue::from(file.client_filename().unwrap_or_default()));
    record.insert("type", ParamValue::from(file.client_media_type().unwrap_or_default()));
    record.insert(
        "size",
        ParamValue::Int(file.size().map_or(0, |s| i64::try_from(s).unwrap_or(i64::MAX))),
    );
    record.insert("tmp_name", ParamValue::Str(tmp_name));
    record.insert("error", ParamValue::Int(i64::from(file.error().code())));
    record
}

// =============================================================================
// native -> PSR-7
// =============================================================================

/// How a native map is laid out.
#[derive(Debug, PartialEq, Eq)]
enum Shape {
    /// One file record with scalar values.
    Record,
    /// One record whose values are parallel arrays of the same nesting.
    ParallelRecord,
    /// Field names (or indices) mapping to further levels.
    Nested,
}

/// Classify one level of a `$_FILES` tree.
///
/// A record carries `error` and only record keys; any of the others may be
/// missing. Record-keyed levels whose values are all maps are either
/// parallel arrays or ordinary nesting of fields that happen to be called
/// `name`, `error`, ...; only parallel arrays hold nothing but error codes
/// under `error`.
fn shape_of(map: &Parameters) -> Result<Shape> {
    let Some(error) = map.get("error") else {
        return Ok(Shape::Nested);
    };
    if !map.keys().all(|k| RECORD_KEYS.contains(&k)) {
        return Ok(Shape::Nested);
    }

    if map.values().all(|v| !v.is_map()) {
        Ok(Shape::Record)
    } else if map.values().all(ParamValue::is_map) {
        if holds_only_codes(error) {
            Ok(Shape::ParallelRecord)
        } else {
            Ok(Shape::Nested)
        }
    } else {
        Err(Error::InvalidUpload(
            "file record mixes scalar and array values".to_string(),
        ))
    }
}

/// Whether every scalar below `value` reads as an integer.
fn holds_only_codes(value: &ParamValue) -> bool {
    match value {
        ParamValue::Map(map) => map.values().all(holds_only_codes),
        scalar => scalar.as_int().is_some(),
    }
}

/// Convert a `$_FILES` shaped parameter tree to an upload tree.
///
/// Scalars found where a nesting level is expected are not uploads and are
/// skipped.
pub fn native_to_uploads(files: &Parameters) -> Result<UploadedFiles> {
    children(files, map_to_node)
}

fn map_to_node(map: &Parameters) -> Result<UploadNode> {
    match shape_of(map)? {
        Shape::Record => Ok(UploadNode::File(record_to_file(map)?)),
        Shape::ParallelRecord => parallel_to_node(map),
        Shape::Nested => level_to_node(map, map_to_node),
    }
}

/// Split parallel arrays into one slice per sub-key and convert the slices.
///
/// Each slice is one nesting level shallower than the arrays it came from,
/// so the walk ends at the scalar leaves.
fn parallel_to_node(record: &Parameters) -> Result<UploadNode> {
    level_to_node(&transpose(record), slice_to_node)
}

fn slice_to_node(slice: &Parameters) -> Result<UploadNode> {
    if slice.values().all(|v| !v.is_map()) {
        Ok(UploadNode::File(record_to_file(slice)?))
    } else if slice.values().all(ParamValue::is_map) {
        parallel_to_node(slice)
    } else {
        Err(Error::InvalidUpload(
            "parallel upload arrays have different depths".to_string(),
        ))
    }
}

/// Convert one nesting level with `convert` applied to each child map.
///
/// Levels whose keys are all integers become indexed, in ascending order.
fn level_to_node(
    level: &Parameters,
    convert: fn(&Parameters) -> Result<UploadNode>,
) -> Result<UploadNode> {
    if level.is_empty() || !level.keys().all(|k| k.parse::<u64>().is_ok()) {
        return Ok(UploadNode::Named(children(level, convert)?));
    }

    let mut indexed: Vec<(u64, &Parameters)> = Vec::with_capacity(level.len());
    for (key, value) in level.iter() {
        if let (Ok(index), ParamValue::Map(child)) = (key.parse::<u64>(), value) {
            indexed.push((index, child));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);

    let children = indexed
        .into_iter()
        .map(|(_, child)| convert(child))
        .collect::<Result<Vec<_>>>()?;
    Ok(UploadNode::Indexed(children))
}

fn children(
    level: &Parameters,
    convert: fn(&Parameters) -> Result<UploadNode>,
) -> Result<UploadedFiles> {
    let mut uploads = UploadedFiles::with_capacity(level.len());
    for (name, value) in level.iter() {
        match value {
            ParamValue::Map(map) => {
                uploads.insert(name, convert(map)?);
            }
            _ => tracing::trace!(field = name, "native_to_uploads: skipping scalar"),
        }
    }
    Ok(uploads)
}

/// Turn `{name: {k: ..}, error: {k: ..}, ..}` into `{k: {name: .., error: .., ..}}`.
///
/// Sub-keys are taken from the `error` array, which every upload carries.
fn transpose(record: &Parameters) -> Parameters {
    let Some(ParamValue::Map(errors)) = record.get("error") else {
        return Parameters::new();
    };

    errors
        .keys()
        .map(|sub_key| {
            let entry: Parameters = record
                .iter()
                .filter_map(|(field, values)| {
                    values
                        .as_map()
                        .and_then(|values| values.get(sub_key))
                        .map(|value| (field, value.clone()))
                })
                .collect();
            (sub_key, ParamValue::Map(entry))
        })
        .collect()
}

/// Build an upload from a record. Only `error` is required.
fn record_to_file(record: &Parameters) -> Result<UploadedFile> {
    let code = record
        .get("error")
        .and_then(ParamValue::as_int)
        .ok_or_else(|| Error::InvalidUpload("error code is not an integer".to_string()))?;
    let error = UploadError::from_code(code)?;

    let size = record
        .get("size")
        .and_then(ParamValue::as_int)
        .and_then(|n| u64::try_from(n).ok());
    let tmp_name = record
        .get("tmp_name")
        .and_then(ParamValue::to_text)
        .unwrap_or_default();

    let mut file = UploadedFile::new(tmp_name, size, error);
    if let Some(name) = non_empty_text(record.get("name")) {
        file = file.with_client_filename(name);
    }
    if let Some(media_type) = non_empty_text(record.get("type")) {
        file = file.with_client_media_type(media_type);
    }
    Ok(file)
}

#[inline]
fn non_empty_text(value: Option<&ParamValue>) -> Option<String> {
    value.and_then(ParamValue::to_text).filter(|s| !s.is_empty())
}
