//! Configuration types for reading project files.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; missing fields fall back to their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and item settings.
//! - [`ParserConfig`] - Which block tags keep their body as raw text.
//! - [`ItemConfig`] - How media items without a source file are handled.
//!
//! # Example
//!
//! ```
//! # use rpp::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.parser().opaque_tags().iter().any(|tag| tag == "VST"));
//! ```

use serde::Deserialize;

use rpp_parser::{DEFAULT_OPAQUE_TAGS, ParseOptions};

use crate::item::SourceFallback;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Item interpretation section.
    #[serde(default)]
    items: ItemConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, items: ItemConfig) -> Self {
        Self { parser, items }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the item configuration.
    pub fn items(&self) -> &ItemConfig {
        &self.items
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Tags whose block bodies are stored as a raw payload.
    #[serde(default = "default_opaque_tags")]
    opaque_tags: Vec<String>,
}

impl ParserConfig {
    /// Creates a parser configuration with the given opaque tags.
    pub fn new(opaque_tags: Vec<String>) -> Self {
        Self { opaque_tags }
    }

    pub fn opaque_tags(&self) -> &[String] {
        &self.opaque_tags
    }

    /// Builds the [`ParseOptions`] this configuration describes.
    pub fn to_parse_options(&self) -> ParseOptions {
        ParseOptions::new(&self.opaque_tags)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            opaque_tags: default_opaque_tags(),
        }
    }
}

fn default_opaque_tags() -> Vec<String> {
    DEFAULT_OPAQUE_TAGS.iter().map(|tag| tag.to_string()).collect()
}

/// Item interpretation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemConfig {
    /// Behavior for items without `SOURCE FILE`.
    #[serde(default)]
    source_fallback: SourceFallback,
}

impl ItemConfig {
    pub fn new(source_fallback: SourceFallback) -> Self {
        Self { source_fallback }
    }

    pub fn source_fallback(&self) -> SourceFallback {
        self.source_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.parser().opaque_tags(), ["COMMENT", "RENDER_CFG", "VST"]);
        assert_eq!(config.items().source_fallback(), SourceFallback::Name);
    }

    #[test]
    fn test_parse_options_follow_config() {
        let parser = ParserConfig::new(vec!["notes".to_string()]);
        let options = parser.to_parse_options();

        assert!(options.is_opaque("NOTES"));
        assert!(!options.is_opaque("VST"));
    }
}
