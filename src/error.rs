//! Error types for [`crate::Publication`].

use std::io;

/// Errors raised while reading entries out of the OCF ZIP container.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive could not be opened at all.
    #[error("archive is unavailable")]
    Unavailable {
        /// The underlying ZIP error, if the failure happened on open.
        #[source]
        source: Option<zip::result::ZipError>,
    },

    /// The requested entry does not exist in the archive.
    #[error("entry not found in archive: {0}")]
    EntryNotFound(String),

    /// An entry was located but could not be fully read.
    #[error("failed to read entry from archive: {entry}")]
    EntryRead {
        /// Path of the entry being read.
        entry: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A `null`/empty path was given where one is forbidden.
    #[error("invalid argument: entry path must not be empty")]
    InvalidArgument,
}

/// Alias for the boxed source carried by [`XmlError`] variants.
///
/// `quick_xml` surfaces a handful of distinct error types (document-level
/// `quick_xml::Error`, attribute-level `AttrError`, escape errors, ...);
/// boxing lets every one of them flow through the same variant without this
/// crate naming each one individually.
type XmlSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while pulling events from the XML reader.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum XmlError {
    /// The reader could not be initialized over the given buffer.
    ///
    /// Reserved for completeness with the error taxonomy this type mirrors;
    /// constructing a reader over an in-memory `&[u8]` cannot itself fail, so
    /// nothing in this crate raises this variant today.
    #[error("could not initialize the XML reader over the given buffer")]
    ReadFromBuffer {
        #[source]
        source: XmlSource,
    },

    /// The reader reported a terminal, unrecoverable parse error.
    #[error("XML parse error")]
    ParseError {
        #[source]
        source: XmlSource,
    },

    /// A required structural piece of a document is missing or malformed.
    #[error("invalid document structure: {0}")]
    DocumentInvalid(String),

    /// An expected element was never found.
    #[error("expected element not found: {0}")]
    ElementNotFound(String),
}

/// The unified error type returned by all fallible [`crate::Publication`] operations.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum PublicationError {
    /// Failure reading the OCF container.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Failure parsing `META-INF/container.xml` or the OPF package document.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The first archive entry was not the literal `application/epub+zip`.
    #[error("first archive entry is not a valid EPUB mimetype record")]
    InvalidMimetype,
}

/// Convenience alias used throughout the crate.
pub type PublicationResult<T> = Result<T, PublicationError>;
