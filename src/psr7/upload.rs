//! Uploaded files and the upload tree.

use std::borrow::Cow;

use crate::core::{Error, Result};
use crate::types::FieldMap;

use super::Stream;

// =============================================================================
// Upload Error
// =============================================================================

/// PHP upload status codes (`UPLOAD_ERR_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UploadError {
    Ok = 0,
    IniSize = 1,
    FormSize = 2,
    Partial = 3,
    NoFile = 4,
    NoTmpDir = 6,
    CantWrite = 7,
    Extension = 8,
}

impl UploadError {
    /// Numeric code as exposed in `$_FILES[...]['error']`.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a status by its numeric code.
    pub fn from_code(code: i64) -> Result<Self> {
        Ok(match code {
            0 => UploadError::Ok,
            1 => UploadError::IniSize,
            2 => UploadError::FormSize,
            3 => UploadError::Partial,
            4 => UploadError::NoFile,
            6 => UploadError::NoTmpDir,
            7 => UploadError::CantWrite,
            8 => UploadError::Extension,
            other => {
                return Err(Error::InvalidUpload(format!(
                    "unknown upload error code {}",
                    other
                )))
            }
        })
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, UploadError::Ok)
    }

    /// Short description of the status.
    pub const fn description(self) -> &'static str {
        match self {
            UploadError::Ok => "upload succeeded",
            UploadError::IniSize => "file exceeds upload_max_filesize",
            UploadError::FormSize => "file exceeds MAX_FILE_SIZE",
            UploadError::Partial => "file was only partially uploaded",
            UploadError::NoFile => "no file was uploaded",
            UploadError::NoTmpDir => "missing temporary directory",
            UploadError::CantWrite => "failed to write file to disk",
            UploadError::Extension => "upload stopped by extension",
        }
    }
}

// =============================================================================
// Uploaded File
// =============================================================================

/// Where an upload's bytes are held.
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// Temporary file path (`tmp_name`).
    Path(String),
    /// An already-open stream.
    Stream(Stream),
}

impl From<Stream> for UploadSource {
    fn from(stream: Stream) -> Self {
        UploadSource::Stream(stream)
    }
}

impl From<String> for UploadSource {
    fn from(path: String) -> Self {
        UploadSource::Path(path)
    }
}

impl From<&str> for UploadSource {
    fn from(path: &str) -> Self {
        UploadSource::Path(path.to_string())
    }
}

/// A single uploaded file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    source: UploadSource,
    size: Option<u64>,
    error: UploadError,
    client_filename: Option<String>,
    client_media_type: Option<String>,
}

impl UploadedFile {
    /// Create an upload description.
    pub fn new(source: impl Into<UploadSource>, size: Option<u64>, error: UploadError) -> Self {
        Self {
            source: source.into(),
            size,
            error,
            client_filename: None,
            client_media_type: None,
        }
    }

    /// Set the filename sent by the client.
    #[inline]
    pub fn with_client_filename(mut self, name: impl Into<String>) -> Self {
        self.client_filename = Some(name.into());
        self
    }

    /// Set the media type sent by the client.
    #[inline]
    pub fn with_client_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.client_media_type = Some(media_type.into());
        self
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn error(&self) -> UploadError {
        self.error
    }

    #[inline]
    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    #[inline]
    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    #[inline]
    pub fn source(&self) -> &UploadSource {
        &self.source
    }

    /// Storage reference: the temp path or the stream's metadata URI.
    pub fn storage_uri(&self) -> Cow<'_, str> {
        match &self.source {
            UploadSource::Path(path) => Cow::Borrowed(path),
            UploadSource::Stream(stream) => stream.metadata_uri(),
        }
    }

    /// Stream over the uploaded content.
    ///
    /// Fails for uploads that did not succeed; there is no content to read.
    pub fn stream(&self) -> Result<Stream> {
        if !self.error.is_ok() {
            return Err(Error::UploadUnavailable {
                error: self.error.code(),
            });
        }
        Ok(match &self.source {
            UploadSource::Path(path) => Stream::from_path(path),
            UploadSource::Stream(stream) => stream.clone(),
        })
    }
}

// =============================================================================
// Upload Tree
// =============================================================================

/// Uploaded files keyed by form field name.
pub type UploadedFiles = FieldMap<UploadNode>;

/// One node of the upload tree.
#[derive(Debug, Clone)]
pub enum UploadNode {
    /// A single file.
    File(UploadedFile),
    /// Nested fields (`field[sub]`).
    Named(UploadedFiles),
    /// Indexed list (`field[]`).
    Indexed(Vec<UploadNode>),
}

impl UploadNode {
    #[inline]
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            UploadNode::File(file) => Some(file),
            _ => None,
        }
    }

    #[inline]
    pub fn as_named(&self) -> Option<&UploadedFiles> {
        match self {
            UploadNode::Named(children) => Some(children),
            _ => None,
        }
    }

    #[inline]
    pub fn as_indexed(&self) -> Option<&[UploadNode]> {
        match self {
            UploadNode::Indexed(children) => Some(children),
            _ => None,
        }
    }

    /// Number of files below (and including) this node.
    pub fn file_count(&self) -> usize {
        match self {
            UploadNode::File(_) => 1,
            UploadNode::Named(children) => children.values().map(UploadNode::file_count).sum(),
            UploadNode::Indexed(children) => children.iter().map(UploadNode::file_count).sum(),
        }
    }
}

impl From<UploadedFile> for UploadNode {
    fn from(file: UploadedFile) -> Self {
        UploadNode::File(file)
    }
}
