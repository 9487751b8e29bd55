//! Resolves the OPF package path out of `META-INF/container.xml`.

use crate::error::XmlError;
use crate::parser::xml::{XmlEvent, XmlReader};

const CONTAINER_PATH: &str = "META-INF/container.xml";
const ROOTFILE_TAG: &[u8] = b"rootfile";
const FULL_PATH_ATTR: &str = "full-path";

/// Name of the OCF container entry every EPUB must carry.
pub(crate) const CONTAINER_ENTRY_PATH: &str = CONTAINER_PATH;

/// Scans `data` (the bytes of `META-INF/container.xml`) for the first
/// `rootfile` element and returns its `full-path` attribute.
///
/// Only the first matching element is used; additional renditions are
/// ignored, matching the format's convention of treating the first rootfile
/// as the default rendition.
pub(crate) fn resolve_opf_path(data: &[u8]) -> Result<String, XmlError> {
    let mut reader = XmlReader::from_bytes(data);

    while let Some(event) = reader.next() {
        let element = match event? {
            XmlEvent::Start(element) if element.local_name() == ROOTFILE_TAG => element,
            _ => continue,
        };

        return match element.attribute(FULL_PATH_ATTR)? {
            Some(path) => Ok(path),
            None => Err(XmlError::DocumentInvalid(
                "rootfile element is missing its full-path attribute".to_owned(),
            )),
        };
    }

    Err(XmlError::ElementNotFound(
        "no rootfile element found in META-INF/container.xml".to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_rootfile() {
        let xml = br#"<?xml version="1.0"?>
<container xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    <rootfile full-path="OTHER/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

        assert_eq!(resolve_opf_path(xml).unwrap(), "OEBPS/content.opf");
    }

    #[test]
    fn missing_rootfile_is_element_not_found() {
        let xml = br#"<?xml version="1.0"?>
<container xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles/>
</container>"#;

        assert!(matches!(
            resolve_opf_path(xml).unwrap_err(),
            XmlError::ElementNotFound(_)
        ));
    }

    #[test]
    fn rootfile_without_full_path_is_document_invalid() {
        let xml = br#"<?xml version="1.0"?>
<container xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

        assert!(matches!(
            resolve_opf_path(xml).unwrap_err(),
            XmlError::DocumentInvalid(_)
        ));
    }
}
