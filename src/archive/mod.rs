//! Thin adapter over an opened ZIP container.
//!
//! This module intentionally exposes only the handful of operations the OPF
//! parser and container resolver need: locating an entry by path, reading it
//! whole into memory, and counting entries. It says nothing about content
//! encoding or compression beyond what the `zip` crate already provides.

mod mimetype;

pub(crate) use mimetype::validate_mimetype;

use crate::error::ArchiveError;
use std::io::{Read, Seek};
use zip::ZipArchive as Zip;

/// Required literal first-entry content of every EPUB container.
pub(crate) const REQUIRED_MIMETYPE: &str = "application/epub+zip";

/// A single-threaded adapter over a [`zip::ZipArchive`].
///
/// Callers are expected to serialize access themselves; this type holds no
/// internal locking, matching the single-threaded scheduling model of the
/// parser that drives it.
pub(crate) struct Archive<R> {
    zip: Zip<R>,
}

impl<R: Read + Seek> Archive<R> {
    /// Opens `reader` as a ZIP container.
    pub(crate) fn open(reader: R) -> Result<Self, ArchiveError> {
        let zip = Zip::new(reader).map_err(|source| ArchiveError::Unavailable {
            source: Some(source),
        })?;
        Ok(Self { zip })
    }

    /// Number of entries in the archive.
    pub(crate) fn entry_count(&self) -> usize {
        self.zip.len()
    }

    /// Reads the entire contents of `path` into memory.
    pub(crate) fn read_entire_entry(&mut self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        if path.is_empty() {
            return Err(ArchiveError::InvalidArgument);
        }

        let mut file = self
            .zip
            .by_name(path)
            .map_err(|_| ArchiveError::EntryNotFound(path.to_owned()))?;

        let mut buffer = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buffer)
            .map_err(|source| ArchiveError::EntryRead {
                entry: path.to_owned(),
                source,
            })?;
        Ok(buffer)
    }

    /// Reads the first `len` bytes of the very first entry in the archive,
    /// used only by [`validate_mimetype`].
    pub(crate) fn read_first_entry_prefix(&mut self, len: usize) -> Result<Vec<u8>, ArchiveError> {
        let mut file = self.zip.by_index(0).map_err(|_| ArchiveError::EntryNotFound(
            "<first entry>".to_owned(),
        ))?;

        let mut buffer = vec![0u8; len];
        let read = file
            .read(&mut buffer)
            .map_err(|source| ArchiveError::EntryRead {
                entry: "<first entry>".to_owned(),
                source,
            })?;
        buffer.truncate(read);
        Ok(buffer)
    }
}
