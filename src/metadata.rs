//! Publication-level Dublin Core metadata.

/// The publication's title, language, and primary identifier.
///
/// All fields are optional: a well-formed but minimal OPF document may carry
/// none of them, which is not an error (see the format's tolerant parsing
/// policy).
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub(crate) title: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) identifier: Option<String>,
    /// The value of `package/@unique-identifier`, tracked so the parser can
    /// tell which `<dc:identifier>` element is the primary one once it is
    /// encountered, regardless of document order.
    pub(crate) unique_identifier_id: Option<String>,
}

impl Metadata {
    /// The publication's title, if one was declared.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The publication's language tag, if one was declared.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The publication's primary identifier: the text of the `<dc:identifier>`
    /// element whose `id` matches `package/@unique-identifier`.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}
