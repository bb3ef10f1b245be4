//! Message body streams.

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::{Bytes, BytesMut};

use crate::core::Result;

/// Where a stream keeps its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStorage {
    /// `php://memory` - always held in memory.
    Memory,
    /// `php://temp` - scratch buffer.
    Temp,
    /// A named file on disk.
    File(PathBuf),
}

impl StreamStorage {
    /// The stream's metadata URI (`php://memory`, `php://temp` or the file path).
    pub fn uri(&self) -> Cow<'_, str> {
        match self {
            StreamStorage::Memory => Cow::Borrowed("php://memory"),
            StreamStorage::Temp => Cow::Borrowed("php://temp"),
            StreamStorage::File(path) => path.to_string_lossy(),
        }
    }

    /// Whether the bytes live in process memory.
    #[inline]
    pub fn is_buffered(&self) -> bool {
        matches!(self, StreamStorage::Memory | StreamStorage::Temp)
    }
}

/// Readable/writable body byte source.
///
/// Buffered streams own their bytes; file streams read from and append to
/// the file on demand and never cache its content.
#[derive(Debug, Clone)]
pub struct Stream {
    storage: StreamStorage,
    buffer: BytesMut,
}

impl Stream {
    /// Create an empty `php://memory` stream.
    #[inline]
    pub fn memory() -> Self {
        Self {
            storage: StreamStorage::Memory,
            buffer: BytesMut::new(),
        }
    }

    /// Create an empty `php://temp` stream.
    #[inline]
    pub fn temp() -> Self {
        Self {
            storage: StreamStorage::Temp,
            buffer: BytesMut::new(),
        }
    }

    /// Create a stream backed by the file at `path`.
    ///
    /// The file is not touched until the stream is read or written.
    #[inline]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StreamStorage::File(path.into()),
            buffer: BytesMut::new(),
        }
    }

    /// Create a `php://memory` stream holding `data`.
    pub fn from_bytes(data: impl AsRef<[u8]>) -> Self {
        Self {
            storage: StreamStorage::Memory,
            buffer: BytesMut::from(data.as_ref()),
        }
    }

    /// Storage tag.
    #[inline]
    pub fn storage(&self) -> &StreamStorage {
        &self.storage
    }

    /// Metadata URI of the stream.
    #[inline]
    pub fn metadata_uri(&self) -> Cow<'_, str> {
        self.storage.uri()
    }

    /// Path of a file-backed stream.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            StreamStorage::File(path) => Some(path),
            _ => None,
        }
    }

    /// Append `data`, returning the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        match &self.storage {
            StreamStorage::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(data)?;
            }
            _ => self.buffer.extend_from_slice(data),
        }
        Ok(data.len())
    }

    /// Read the whole content.
    pub fn contents(&self) -> Result<Bytes> {
        match &self.storage {
            StreamStorage::File(path) => Ok(Bytes::from(std::fs::read(path)?)),
            _ => Ok(Bytes::copy_from_slice(&self.buffer)),
        }
    }

    /// Size in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        match &self.storage {
            StreamStorage::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            _ => Some(self.buffer.len() as u64),
        }
    }

    /// Open a read-only handle to the backing file.
    ///
    /// Buffered streams have no file to open and return `InvalidInput`.
    pub fn open_read(&self) -> Result<File> {
        match &self.storage {
            StreamStorage::File(path) => Ok(File::open(path)?),
            storage => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not backed by a file", storage.uri()),
            )
            .into()),
        }
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::memory()
    }
}
