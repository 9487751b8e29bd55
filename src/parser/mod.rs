//! OPF parsing: an explicit, bounded stack of parse contexts driving a
//! forward-only pass over the package document's pull-reader events.

mod container;
mod opf;
mod xml;

pub(crate) use container::{CONTAINER_ENTRY_PATH, resolve_opf_path};
pub(crate) use opf::parse_opf;

/// The four states the OPF parser's context stack can be in.
///
/// There is no terminal state: the parser simply stops when the reader
/// reports end-of-document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseState {
    Root,
    Metadata,
    Manifest,
    Spine,
}

/// One frame of the parse-context stack.
///
/// Pushed on a non-empty element-start, popped on the matching element-end.
/// Owns its tag name and captured attributes so nothing from the XML reader
/// is retained past the event that produced it.
pub(crate) struct ParseFrame {
    pub(crate) state: ParseState,
    pub(crate) tag: Vec<u8>,
    pub(crate) should_capture_text: bool,
}

impl ParseFrame {
    pub(crate) fn new(state: ParseState, tag: Vec<u8>, should_capture_text: bool) -> Self {
        Self {
            state,
            tag,
            should_capture_text,
        }
    }
}

/// Bounded parse-context stack.
///
/// Mirrors the reference implementation's fixed-size `EPUB3OPFParseContext`
/// array with a `currentContext` pointer, expressed as a growable `Vec` with
/// an enforced maximum depth instead of a raw pointer into a fixed buffer.
pub(crate) struct ParseStack {
    frames: Vec<ParseFrame>,
    max_depth: usize,
}

impl ParseStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: vec![ParseFrame::new(ParseState::Root, Vec::new(), false)],
            max_depth,
        }
    }

    pub(crate) fn state(&self) -> ParseState {
        self.top().state
    }

    pub(crate) fn top(&self) -> &ParseFrame {
        self.frames.last().expect("root frame is never popped")
    }

    /// Pushes a new frame. Returns `Err` if this would exceed `max_depth`.
    pub(crate) fn push(&mut self, frame: ParseFrame) -> Result<(), crate::error::XmlError> {
        if self.frames.len() >= self.max_depth {
            let message = format!(
                "parse context stack exceeded maximum depth of {}",
                self.max_depth
            );
            return Err(crate::error::XmlError::ParseError {
                source: Box::new(std::io::Error::other(message)),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pops the top frame if its tag matches `end_tag`, freeing its owned
    /// attributes. A mismatched end tag is tolerated (recovery mode) and
    /// leaves the stack untouched.
    pub(crate) fn pop_if_matches(&mut self, end_tag: &[u8]) -> bool {
        if self.frames.len() > 1 && self.top().tag == end_tag {
            self.frames.pop();
            true
        } else {
            false
        }
    }
}
