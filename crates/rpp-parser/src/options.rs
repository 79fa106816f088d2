//! Parser options.

use indexmap::IndexSet;

/// Tags whose block bodies are kept as raw text by default: comment
/// blocks, render configuration and embedded plugin state.
pub const DEFAULT_OPAQUE_TAGS: [&str; 3] = ["COMMENT", "RENDER_CFG", "VST"];

/// Options controlling how a project file is parsed.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Upper-cased tags whose bodies become a payload instead of children.
    opaque_tags: IndexSet<String>,
}

impl ParseOptions {
    /// Create options with the given opaque tag set.
    ///
    /// Tags are matched case-insensitively.
    pub fn new<I, S>(opaque_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            opaque_tags: opaque_tags
                .into_iter()
                .map(|tag| tag.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Add one more opaque tag.
    pub fn with_opaque_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.opaque_tags.insert(tag.as_ref().to_ascii_uppercase());
        self
    }

    /// Returns `true` if blocks tagged `tag` keep their body as raw text.
    pub fn is_opaque(&self, tag: &str) -> bool {
        self.opaque_tags.contains(tag.to_ascii_uppercase().as_str())
    }

    /// The opaque tags, in insertion order.
    pub fn opaque_tags(&self) -> impl Iterator<Item = &str> {
        self.opaque_tags.iter().map(String::as_str)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OPAQUE_TAGS)
    }
}
