//! The root aggregate: an opened, fully-parsed EPUB publication.

use crate::archive::Archive;
use crate::error::{PublicationError, PublicationResult};
use crate::manifest::{Manifest, ManifestItem};
use crate::metadata::Metadata;
use crate::parser::{CONTAINER_ENTRY_PATH, parse_opf, resolve_opf_path};
use crate::settings::PublicationSettings;
use crate::spine::Spine;
use std::io::{Read, Seek};

/// An opened EPUB publication: its metadata, manifest, and reading order.
///
/// Holds the archive handle it was opened from for the lifetime of the
/// value; there is no separate "close" step, matching this crate's
/// ownership-based lifetime model (see the module-level notes in
/// [`crate`]).
pub struct Publication<R> {
    archive: Archive<R>,
    metadata: Metadata,
    manifest: Manifest,
    spine: Spine,
}

impl<R: Read + Seek> Publication<R> {
    /// Opens `reader` as an EPUB archive, validates its mimetype, resolves
    /// and parses its OPF package document, and returns the resulting
    /// publication, using [default settings](PublicationSettings::default).
    pub fn open(reader: R) -> PublicationResult<Self> {
        Self::open_with(reader, &PublicationSettings::default())
    }

    /// Like [`open`](Self::open), with explicit [`PublicationSettings`].
    pub fn open_with(reader: R, settings: &PublicationSettings) -> PublicationResult<Self> {
        let mut archive = Archive::open(reader).map_err(PublicationError::from)?;
        crate::archive::validate_mimetype(&mut archive)?;

        let container_bytes = archive
            .read_entire_entry(CONTAINER_ENTRY_PATH)
            .map_err(PublicationError::from)?;
        let opf_path = resolve_opf_path(&container_bytes)?;

        let opf_bytes = archive
            .read_entire_entry(&opf_path)
            .map_err(PublicationError::from)?;
        let package = parse_opf(&opf_bytes, settings)?;

        log::debug!(
            "parsed publication: {} manifest item(s), {} spine item(s) ({} linear)",
            package.manifest.len(),
            package.spine.len(),
            package.spine.linear_count()
        );

        Ok(Self {
            archive,
            metadata: package.metadata,
            manifest: package.manifest,
            spine: package.spine,
        })
    }

    /// The publication's title, language, and primary identifier.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The publication's declared resources.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The publication's default reading order.
    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    /// Number of entries in the archive this publication was opened from.
    pub fn archive_entry_count(&self) -> usize {
        self.archive.entry_count()
    }

    /// Number of linear spine items; the length of
    /// [`sequential_resource_paths`](Self::sequential_resource_paths).
    pub fn sequential_resource_count(&self) -> usize {
        self.spine.linear_count()
    }

    /// The `href`s of linear spine items' resolved manifest items, in spine
    /// order.
    ///
    /// A linear spine item whose `idref` does not resolve to any manifest
    /// item (a dangling reference) is skipped rather than surfaced as an
    /// error or a placeholder entry.
    pub fn sequential_resource_paths(&self) -> Vec<&str> {
        self.spine
            .items()
            .iter()
            .filter(|item| item.is_linear())
            .filter_map(|item| item.manifest_item(&self.manifest))
            .map(ManifestItem::href)
            .collect()
    }

    /// Returns an owned copy of the manifest item with the given id, if
    /// present.
    pub fn copy_manifest_item_by_id(&self, id: &str) -> Option<ManifestItem> {
        self.manifest.copy_by_id(id)
    }
}
