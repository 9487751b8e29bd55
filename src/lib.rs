#![warn(missing_docs)]
//! # epub-core
//!
//! A focused EPUB 3 reader core: open an OCF container, resolve its OPF
//! package document, and expose the publication's metadata, manifest, and
//! spine as a read-only, queryable model.
//!
//! ```no_run
//! use epub_core::Publication;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("book.epub")?;
//! let publication = Publication::open(file)?;
//!
//! println!("{:?}", publication.metadata().title());
//! for href in publication.sequential_resource_paths() {
//!     println!("{href}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Scope
//! This crate covers the reading-order core of the format: the OCF
//! container, the OPF package document's metadata/manifest/spine, and the
//! resource graph between them. It does not decode content documents, the
//! navigation document, media overlays, encryption, or fonts — those are
//! layered on top by a caller.

mod archive;
mod error;
mod manifest;
mod metadata;
mod parser;
mod publication;
mod settings;
mod spine;

pub use error::{ArchiveError, PublicationError, PublicationResult, XmlError};
pub use manifest::{Manifest, ManifestItem};
pub use metadata::Metadata;
pub use publication::Publication;
pub use settings::{DEFAULT_MAX_PARSE_DEPTH, PublicationSettings};
pub use spine::{Spine, SpineItem};
