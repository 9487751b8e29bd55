//! Configuration surface controlling parser strictness and limits.

/// The default maximum depth of the OPF parse-context stack.
///
/// Mirrors `PARSE_CONTEXT_STACK_DEPTH` from the reference implementation this
/// crate's parser is modeled after.
pub const DEFAULT_MAX_PARSE_DEPTH: usize = 64;

/// Settings controlling how a [`crate::Publication`] is parsed.
///
/// Strictness here is purely about *observability*: a structurally absent
/// `<metadata>`, `<manifest>`, or `<spine>` element is still folded into the
/// resulting model either way (as all-absent fields or an empty collection).
/// Under [`strict`](Self::strict) that absence is additionally logged at
/// `warn` instead of `debug`, so an operator embedding this crate can choose
/// how noisy that particular deviation should be. Other tolerated conditions
/// (a manifest item missing `id`, a dangling `idref`, an unknown element)
/// always log at `debug`, regardless of this setting.
#[derive(Debug, Clone)]
pub struct PublicationSettings {
    pub(crate) strict: bool,
    pub(crate) max_parse_depth: usize,
}

impl Default for PublicationSettings {
    fn default() -> Self {
        Self {
            strict: true,
            max_parse_depth: DEFAULT_MAX_PARSE_DEPTH,
        }
    }
}

impl PublicationSettings {
    /// Returns a builder seeded with the default settings.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Toggles whether structurally-absent sections are logged at `warn`
    /// (`true`, the default) rather than `debug` (`false`).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Overrides the maximum depth of the OPF parse-context stack.
    ///
    /// Exceeding this depth is always a parse error, regardless of [`strict`](Self::strict).
    pub fn max_parse_depth(mut self, max_parse_depth: usize) -> Self {
        self.max_parse_depth = max_parse_depth;
        self
    }
}
