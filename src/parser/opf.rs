//! Drives the OPF package document through the explicit parse-context stack
//! described in [`crate::parser`], populating [`Metadata`], [`Manifest`],
//! and [`Spine`].

use crate::error::XmlError;
use crate::manifest::{Manifest, ManifestItem};
use crate::metadata::Metadata;
use crate::parser::xml::{XmlEvent, XmlReader, XmlStartElement};
use crate::parser::{ParseFrame, ParseStack, ParseState};
use crate::settings::PublicationSettings;
use crate::spine::{Spine, SpineItem};

const TAG_PACKAGE: &[u8] = b"package";
const TAG_METADATA: &[u8] = b"metadata";
const TAG_MANIFEST: &[u8] = b"manifest";
const TAG_SPINE: &[u8] = b"spine";
const TAG_TITLE: &[u8] = b"title";
const TAG_IDENTIFIER: &[u8] = b"identifier";
const TAG_LANGUAGE: &[u8] = b"language";
const TAG_ITEM: &[u8] = b"item";
const TAG_ITEMREF: &[u8] = b"itemref";

const ATTR_UNIQUE_IDENTIFIER: &str = "unique-identifier";
const ATTR_ID: &str = "id";
const ATTR_HREF: &str = "href";
const ATTR_MEDIA_TYPE: &str = "media-type";
const ATTR_PROPERTIES: &str = "properties";
const ATTR_IDREF: &str = "idref";
const ATTR_LINEAR: &str = "linear";
const LINEAR_YES: &str = "yes";

/// The three entity-model aggregates the OPF parser builds.
pub(crate) struct ParsedPackage {
    pub(crate) metadata: Metadata,
    pub(crate) manifest: Manifest,
    pub(crate) spine: Spine,
}

/// Parses `data` (the bytes of the OPF package document) into a
/// [`ParsedPackage`], driven by [`settings`](PublicationSettings).
pub(crate) fn parse_opf(
    data: &[u8],
    settings: &PublicationSettings,
) -> Result<ParsedPackage, XmlError> {
    let mut reader = XmlReader::from_bytes(data);
    let mut stack = ParseStack::new(settings.max_parse_depth);
    let mut metadata = Metadata::default();
    let mut manifest = Manifest::new();
    let mut spine = Spine::new();
    let mut seen = SeenSections::default();

    while let Some(event) = reader.next() {
        match event? {
            XmlEvent::Start(element) => {
                handle_start(
                    &element,
                    &mut stack,
                    &mut metadata,
                    &mut manifest,
                    &mut spine,
                    &mut seen,
                )?;
            }
            XmlEvent::End(tag) => {
                stack.pop_if_matches(&tag);
            }
            XmlEvent::Text(text) => {
                handle_text(&text, &mut stack, &mut metadata);
            }
        }
    }

    seen.log_absences(settings);

    Ok(ParsedPackage {
        metadata,
        manifest,
        spine,
    })
}

/// Tracks which of the OPF's three major sections were actually present, so
/// a fully-absent one can still be logged even though it produces no error
/// (see the configuration surface's strictness notes).
#[derive(Default)]
struct SeenSections {
    metadata: bool,
    manifest: bool,
    spine: bool,
}

impl SeenSections {
    fn log_absences(&self, settings: &PublicationSettings) {
        if !self.metadata {
            log_tolerated(settings, "OPF has no <metadata> element");
        }
        if !self.manifest {
            log_tolerated(settings, "OPF has no <manifest> element");
        }
        if !self.spine {
            log_tolerated(settings, "OPF has no <spine> element");
        }
    }
}

fn handle_start(
    element: &XmlStartElement<'_>,
    stack: &mut ParseStack,
    metadata: &mut Metadata,
    manifest: &mut Manifest,
    spine: &mut Spine,
    seen: &mut SeenSections,
) -> Result<(), XmlError> {
    let name = element.local_name();

    match stack.state() {
        ParseState::Root => handle_root_start(&name, element, stack, metadata, seen)?,
        ParseState::Metadata => handle_metadata_start(&name, element, stack, metadata)?,
        ParseState::Manifest => handle_manifest_start(&name, element, stack, manifest)?,
        ParseState::Spine => handle_spine_start(&name, element, stack, spine, manifest)?,
    }
    Ok(())
}

fn handle_text(text: &str, stack: &mut ParseStack, metadata: &mut Metadata) {
    if stack.state() != ParseState::Metadata || !stack.top().should_capture_text {
        return;
    }

    match stack.top().tag.as_slice() {
        TAG_TITLE => metadata.title = Some(text.to_owned()),
        TAG_IDENTIFIER => metadata.identifier = Some(text.to_owned()),
        TAG_LANGUAGE => metadata.language = Some(text.to_owned()),
        _ => {}
    }
}

fn handle_root_start(
    name: &[u8],
    element: &XmlStartElement<'_>,
    stack: &mut ParseStack,
    metadata: &mut Metadata,
    seen: &mut SeenSections,
) -> Result<(), XmlError> {
    match name {
        TAG_PACKAGE => {
            if let Some(unique_id) = element.attribute(ATTR_UNIQUE_IDENTIFIER)? {
                metadata.unique_identifier_id = Some(unique_id);
            }
        }
        TAG_METADATA => {
            seen.metadata = true;
            if !element.is_self_closing() {
                stack.push(ParseFrame::new(ParseState::Metadata, name.to_vec(), false))?;
            }
        }
        TAG_MANIFEST => {
            seen.manifest = true;
            if !element.is_self_closing() {
                stack.push(ParseFrame::new(ParseState::Manifest, name.to_vec(), false))?;
            }
        }
        TAG_SPINE => {
            seen.spine = true;
            if !element.is_self_closing() {
                stack.push(ParseFrame::new(ParseState::Spine, name.to_vec(), false))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_metadata_start(
    name: &[u8],
    element: &XmlStartElement<'_>,
    stack: &mut ParseStack,
    metadata: &mut Metadata,
) -> Result<(), XmlError> {
    if element.is_self_closing() {
        return Ok(());
    }

    let mut should_capture_text = matches!(name, TAG_TITLE | TAG_IDENTIFIER | TAG_LANGUAGE);

    if name == TAG_IDENTIFIER {
        let id = element.attribute(ATTR_ID)?;
        should_capture_text = match (id, &metadata.unique_identifier_id) {
            (Some(id), Some(unique_id)) => &id == unique_id,
            _ => false,
        };
    }

    stack.push(ParseFrame::new(
        ParseState::Metadata,
        name.to_vec(),
        should_capture_text,
    ))?;
    Ok(())
}

fn handle_manifest_start(
    name: &[u8],
    element: &XmlStartElement<'_>,
    stack: &mut ParseStack,
    manifest: &mut Manifest,
) -> Result<(), XmlError> {
    if name == TAG_ITEM {
        if let Some(item) = parse_item(element)? {
            manifest.insert(item);
        } else {
            log::debug!("manifest item skipped: missing required id attribute");
        }
        return Ok(());
    }

    if !element.is_self_closing() {
        log::debug!("unknown element <{}> tolerated inside <manifest>", String::from_utf8_lossy(name));
        stack.push(ParseFrame::new(ParseState::Manifest, name.to_vec(), false))?;
    }
    Ok(())
}

fn handle_spine_start(
    name: &[u8],
    element: &XmlStartElement<'_>,
    stack: &mut ParseStack,
    spine: &mut Spine,
    manifest: &Manifest,
) -> Result<(), XmlError> {
    if name == TAG_ITEMREF {
        let item = parse_itemref(element)?;
        if let Some(idref) = item.idref.as_deref()
            && manifest.by_id(idref).is_none()
        {
            log::debug!("itemref idref {idref:?} did not resolve against the manifest");
        }
        spine.push(item);
        return Ok(());
    }

    if !element.is_self_closing() {
        log::debug!(
            "unknown element <{}> tolerated inside <spine>",
            String::from_utf8_lossy(name)
        );
        stack.push(ParseFrame::new(ParseState::Spine, name.to_vec(), false))?;
    }
    Ok(())
}

fn parse_item(element: &XmlStartElement<'_>) -> Result<Option<ManifestItem>, XmlError> {
    let Some(id) = element.attribute(ATTR_ID)? else {
        return Ok(None);
    };
    let href = element.attribute(ATTR_HREF)?.unwrap_or_default();
    let media_type = element.attribute(ATTR_MEDIA_TYPE)?.unwrap_or_default();
    let properties = element.attribute(ATTR_PROPERTIES)?;

    Ok(Some(ManifestItem {
        id,
        href,
        media_type,
        properties,
    }))
}

fn parse_itemref(element: &XmlStartElement<'_>) -> Result<SpineItem, XmlError> {
    let idref = element.attribute(ATTR_IDREF)?;
    let linear = element
        .attribute(ATTR_LINEAR)?
        .is_none_or(|value| value == LINEAR_YES);

    Ok(SpineItem { idref, linear })
}

fn log_tolerated(settings: &PublicationSettings, message: &str) {
    if settings.strict {
        log::warn!("{message}");
    } else {
        log::debug!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(opf: &str) -> ParsedPackage {
        parse_opf(opf.as_bytes(), &PublicationSettings::default()).unwrap()
    }

    #[test]
    fn unknown_elements_are_tolerated_at_every_level() {
        let opf = r#"<?xml version="1.0"?>
<package unique-identifier="pub-id">
  <metadata>
    <dc:identifier id="pub-id">urn:uuid:X</dc:identifier>
    <meta property="dcterms:modified">2024-01-01</meta>
  </metadata>
  <manifest>
    <bindings><mediaType media-type="audio/mpeg" handler="h"/></bindings>
    <item id="a" href="a.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <collection role="unknown"><link href="x"/></collection>
    <itemref idref="a"/>
  </spine>
</package>"#;

        let package = parse(opf);
        assert_eq!(package.metadata.identifier(), Some("urn:uuid:X"));
        assert_eq!(package.manifest.len(), 1);
        assert_eq!(package.spine.len(), 1);
    }

    #[test]
    fn manifest_item_without_id_is_skipped() {
        let opf = r#"<?xml version="1.0"?>
<package unique-identifier="pub-id">
  <manifest>
    <item href="a.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine/>
</package>"#;

        assert!(parse(opf).manifest.is_empty());
    }

    #[test]
    fn identifier_without_id_attribute_is_not_primary() {
        let opf = r#"<?xml version="1.0"?>
<package unique-identifier="pub-id">
  <metadata>
    <dc:identifier>not-primary</dc:identifier>
  </metadata>
  <manifest/>
  <spine/>
</package>"#;

        assert_eq!(parse(opf).metadata.identifier(), None);
    }

    #[test]
    fn spine_item_without_linear_attribute_defaults_linear() {
        let opf = r#"<?xml version="1.0"?>
<package unique-identifier="pub-id">
  <manifest/>
  <spine><itemref idref="a"/></spine>
</package>"#;

        let package = parse(opf);
        assert!(package.spine.items()[0].is_linear());
        assert_eq!(package.spine.linear_count(), 1);
    }

    #[test]
    fn max_parse_depth_is_enforced() {
        let mut opf = String::from(r#"<?xml version="1.0"?><package unique-identifier="p"><metadata>"#);
        for _ in 0..10 {
            opf.push_str("<wrapper>");
        }
        opf.push_str("</metadata></package>");

        let settings = PublicationSettings::builder().max_parse_depth(4);
        let err = parse_opf(opf.as_bytes(), &settings).unwrap_err();
        assert!(matches!(err, XmlError::ParseError { .. }));
    }
}
