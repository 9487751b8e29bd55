//! A thin pull-reader wrapper over `quick_xml`, trimmed to what the container
//! resolver and OPF parser need: start/end/text events, local-name matching
//! that ignores namespace prefixes (so `dc:title` and `title` match the same
//! way), and owned attribute lookup.

use crate::error::XmlError;
use quick_xml::escape;
use quick_xml::{Decoder, Reader};
use quick_xml::events::{BytesStart, Event};

/// One pulled node, already stripped of anything the parser never needs
/// (processing instructions, doctypes; CDATA is folded into text).
pub(crate) enum XmlEvent<'a> {
    Start(XmlStartElement<'a>),
    End(Vec<u8>),
    Text(String),
}

/// A start (or self-closing/"empty") element.
pub(crate) struct XmlStartElement<'a> {
    element: BytesStart<'a>,
    self_closing: bool,
    decoder: Decoder,
}

impl<'a> XmlStartElement<'a> {
    /// Local name with any namespace prefix stripped, e.g. `identifier` for `dc:identifier`.
    pub(crate) fn local_name(&self) -> Vec<u8> {
        self.element.local_name().as_ref().to_vec()
    }

    /// `true` for `<item/>`-style self-closing elements.
    pub(crate) fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Looks up an attribute by exact key (attribute names in the OPF/OCF
    /// subset this crate parses are never namespace-prefixed), returning its
    /// decoded, unescaped value if present.
    pub(crate) fn attribute(&self, key: &str) -> Result<Option<String>, XmlError> {
        let raw = self
            .element
            .try_get_attribute(key)
            .map_err(|source| XmlError::ParseError {
                source: Box::new(source),
            })?;
        let Some(attribute) = raw else {
            return Ok(None);
        };
        let decoded = self
            .decoder
            .decode(attribute.value.as_ref())
            .map_err(|source| XmlError::ParseError {
                source: Box::new(source),
            })?;
        let unescaped = escape::unescape(&decoded).map_err(|source| XmlError::ParseError {
            source: Box::new(source),
        })?;
        Ok(Some(unescaped.into_owned()))
    }
}

/// A pull-style reader over an in-memory XML document.
pub(crate) struct XmlReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> XmlReader<'a> {
    pub(crate) fn from_bytes(data: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(true);
        Self { reader }
    }

    /// Pulls the next meaningful event. Returns `None` at end-of-document.
    ///
    /// The underlying reader is configured for recovery: malformed markup
    /// does not abort the pull loop on its own; only a terminal error from
    /// `quick_xml` surfaces here as [`XmlError::ParseError`].
    pub(crate) fn next(&mut self) -> Option<Result<XmlEvent<'a>, XmlError>> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    return Some(Err(XmlError::ParseError {
                        source: Box::new(source),
                    }));
                }
            };
            let decoder = self.reader.decoder();
            return Some(Ok(match event {
                Event::Start(e) => XmlEvent::Start(XmlStartElement {
                    element: e,
                    self_closing: false,
                    decoder,
                }),
                Event::Empty(e) => XmlEvent::Start(XmlStartElement {
                    element: e,
                    self_closing: true,
                    decoder,
                }),
                Event::End(e) => XmlEvent::End(e.local_name().as_ref().to_vec()),
                Event::Text(e) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(source) => {
                            log::warn!("dropping text node with invalid escape sequence: {source}");
                            continue;
                        }
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    XmlEvent::Text(text)
                }
                Event::CData(e) => {
                    XmlEvent::Text(String::from_utf8_lossy(e.as_ref()).into_owned())
                }
                Event::Eof => return None,
                // Comments, declarations, PIs, doctypes: ignored.
                _ => continue,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_namespace_prefix() {
        let mut reader = XmlReader::from_bytes(b"<dc:identifier id=\"x\"/>");
        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected a start event");
        };
        assert_eq!(el.local_name(), b"identifier");
        assert!(el.is_self_closing());
        assert_eq!(el.attribute("id").unwrap().as_deref(), Some("x"));
        assert_eq!(el.attribute("missing").unwrap(), None);
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let mut reader = XmlReader::from_bytes(br#"<link href="a&amp;b"/>"#);
        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected a start event");
        };
        assert_eq!(el.attribute("href").unwrap().as_deref(), Some("a&b"));
    }

    #[test]
    fn unescapable_text_is_dropped_not_returned() {
        let mut reader = XmlReader::from_bytes(b"<title>a &bogus; b</title>");
        assert!(matches!(reader.next(), Some(Ok(XmlEvent::Start(_)))));
        // The malformed entity reference is tolerated: the text node is
        // dropped (logged at warn) rather than surfacing a parse error, and
        // the reader carries on to the closing tag.
        assert!(matches!(reader.next(), Some(Ok(XmlEvent::End(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn text_events_are_trimmed_and_whitespace_only_is_skipped() {
        let mut reader = XmlReader::from_bytes(b"<title>  Hello  </title>");
        assert!(matches!(reader.next(), Some(Ok(XmlEvent::Start(_)))));
        let Some(Ok(XmlEvent::Text(text))) = reader.next() else {
            panic!("expected a text event");
        };
        assert_eq!(text, "Hello");
        assert!(matches!(reader.next(), Some(Ok(XmlEvent::End(_)))));
        assert!(reader.next().is_none());
    }
}
