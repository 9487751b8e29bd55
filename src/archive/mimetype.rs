use crate::archive::{Archive, REQUIRED_MIMETYPE};
use crate::error::PublicationError;
use std::io::{Read, Seek};

/// Validates that the first entry of the archive is the literal
/// `application/epub+zip` mimetype record.
///
/// No other entry is touched. This check is optional but recommended before
/// trusting the rest of the container.
pub(crate) fn validate_mimetype<R: Read + Seek>(
    archive: &mut Archive<R>,
) -> Result<(), PublicationError> {
    let prefix = archive.read_first_entry_prefix(REQUIRED_MIMETYPE.len())?;

    if prefix == REQUIRED_MIMETYPE.as_bytes() {
        Ok(())
    } else {
        Err(PublicationError::InvalidMimetype)
    }
}
