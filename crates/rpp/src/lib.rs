//! RPP - read REAPER project files.
//!
//! Parses `.rpp` project files into a queryable node tree and reads the
//! records the file describes: tracks, their media items, and markers.

pub mod config;

mod error;
mod item;
mod marker;

pub use rpp_core::{Body, Document, NodeId, NodeRef, Value, query};
pub use rpp_parser::ParseOptions;

pub use error::{InterpretError, RppError};
pub use item::{Item, SourceFallback};
pub use marker::Marker;

use std::{fs, path::Path};

use log::{debug, info, trace};

use rpp_core::query::contains_child;

use config::AppConfig;

/// Reader for REAPER project files.
///
/// Parses project text with the configured options and reads tracks, items
/// and markers out of the resulting [`Document`].
///
/// # Examples
///
/// ```rust
/// use rpp::{ProjectReader, config::AppConfig};
///
/// let source = r#"<REAPER_PROJECT 0.1
///   MARKER 1 10.5 "Intro" 0
///   <TRACK
///     NAME Kewlio
///     <ITEM
///       POSITION 1.5
///       LENGTH 2
///       NAME "voice 1"
///     >
///   >
/// >"#;
///
/// let reader = ProjectReader::new(AppConfig::default());
/// let doc = reader.parse(source).expect("Failed to parse");
///
/// let items = reader.track_items(&doc, "Kewlio").expect("Failed to read items");
/// assert_eq!(items[0].end(), 3.5);
///
/// let markers = reader.markers(&doc).expect("Failed to read markers");
/// assert_eq!(markers[0].name(), "Intro");
/// ```
#[derive(Debug)]
pub struct ProjectReader {
    config: AppConfig,
    options: ParseOptions,
}

impl ProjectReader {
    /// Create a new reader with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let options = config.parser().to_parse_options();
        Self { config, options }
    }

    /// The configuration this reader was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse project text into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`RppError::Parse`] with every structural problem found,
    /// together with `source` for rendering.
    pub fn parse(&self, source: &str) -> Result<Document, RppError> {
        info!(bytes = source.len(); "Parsing project");

        let doc = rpp_parser::parse(source, &self.options)
            .map_err(|err| RppError::new_parse_error(err, source))?;

        debug!(nodes = doc.len(); "Project parsed successfully");
        Ok(doc)
    }

    /// Read and parse a project file.
    ///
    /// # Errors
    ///
    /// Returns [`RppError::Io`] if the file cannot be read, or
    /// [`RppError::Parse`] if it is malformed.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Document, RppError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Reading project file");

        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Find the first track with a `NAME` equal to `name`.
    pub fn find_track<'doc>(&self, doc: &'doc Document, name: &str) -> Option<NodeRef<'doc>> {
        let track = contains_child(doc.query(["TRACK"]), "NAME", name)
            .into_iter()
            .next();
        trace!(name = name, found = track.is_some(); "Track lookup");
        track
    }

    /// Read every item directly inside the track named `name`, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`RppError::TrackNotFound`] if no track has that name, or
    /// [`RppError::Interpret`] for the first item that cannot be read.
    pub fn track_items(&self, doc: &Document, name: &str) -> Result<Vec<Item>, RppError> {
        let track = self
            .find_track(doc, name)
            .ok_or_else(|| RppError::TrackNotFound(name.to_string()))?;

        let fallback = self.config.items().source_fallback();
        let items = track
            .query(["ITEM"])
            .into_iter()
            .map(|node| Item::from_node(node, fallback))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(track = name, items = items.len(); "Read track items");
        Ok(items)
    }

    /// Read every `MARKER` line of the document, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`RppError::Interpret`] for the first marker that cannot be read.
    pub fn markers(&self, doc: &Document) -> Result<Vec<Marker>, RppError> {
        let markers = doc
            .query(["MARKER"])
            .into_iter()
            .map(Marker::from_node)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(markers = markers.len(); "Read markers");
        Ok(markers)
    }
}

impl Default for ProjectReader {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
