//! Media items.
//!
//! An `ITEM` block places a piece of media on a track:
//!
//! ```text
//! <ITEM
//!   POSITION 12.5
//!   LENGTH 30
//!   NAME "Song A.wav"
//!   <SOURCE WAVE
//!     FILE "/media/Song A.wav"
//!   >
//! >
//! ```

use log::warn;
use serde::Deserialize;

use rpp_core::{NodeRef, Value};

use crate::error::InterpretError;

/// What to do with an item that has no `SOURCE FILE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFallback {
    /// Use the item name as its source.
    #[default]
    Name,
    /// Reject the item.
    Deny,
}

/// A media item read from an `ITEM` node.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    position: f64,
    length: f64,
    source: String,
    source_is_fallback: bool,
    line: usize,
}

impl Item {
    /// Read an item from an `ITEM` node.
    ///
    /// `NAME`, `POSITION` and `LENGTH` are looked up among the node's direct
    /// children; the source file comes from `SOURCE FILE`.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpretError`] if the node is not an `ITEM`, if a
    /// required attribute is missing, or if position or length is not a
    /// number.
    pub fn from_node(node: NodeRef<'_>, fallback: SourceFallback) -> Result<Self, InterpretError> {
        if !node.has_tag("ITEM") {
            return Err(InterpretError::WrongNodeKind {
                expected: "ITEM",
                found: node.tag().to_string(),
                line: node.line(),
            });
        }

        let name = attribute(node, "NAME")?.to_string();
        let position = number(node, "POSITION")?;
        let length = number(node, "LENGTH")?;

        let file = node
            .query(["SOURCE", "FILE"])
            .first()
            .and_then(|file| file.param(0));
        let (source, source_is_fallback) = match (file, fallback) {
            (Some(file), _) => (file.to_string(), false),
            (None, SourceFallback::Name) => {
                warn!(item = name.as_str(), line = node.line(); "Item has no source file, using its name");
                (name.clone(), true)
            }
            (None, SourceFallback::Deny) => {
                return Err(InterpretError::MissingAttribute {
                    node: "ITEM",
                    attribute: "SOURCE FILE",
                    line: node.line(),
                });
            }
        };

        Ok(Self {
            name,
            position,
            length,
            source,
            source_is_fallback,
            line: node.line(),
        })
    }

    /// The item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start time in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration in seconds.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// End time in seconds, `position + length`.
    pub fn end(&self) -> f64 {
        self.position + self.length
    }

    /// The source media path, or the item name when no source was found.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if [`source`](Self::source) was substituted by the name.
    pub fn source_is_fallback(&self) -> bool {
        self.source_is_fallback
    }

    /// Line of the `<ITEM` header.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// First parameter of the first direct child tagged `tag`.
fn attribute<'doc>(node: NodeRef<'doc>, tag: &'static str) -> Result<&'doc Value, InterpretError> {
    node.query([tag])
        .first()
        .and_then(|child| child.param(0))
        .ok_or(InterpretError::MissingAttribute {
            node: "ITEM",
            attribute: tag,
            line: node.line(),
        })
}

fn number(node: NodeRef<'_>, tag: &'static str) -> Result<f64, InterpretError> {
    let value = attribute(node, tag)?;
    value.as_f64().ok_or_else(|| InterpretError::InvalidAttribute {
        node: "ITEM",
        attribute: tag,
        value: value.to_string(),
        line: node.line(),
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rpp_core::{Document, DocumentBuilder};

    use super::*;

    /// Build `<ITEM>` with the given attribute lines and an optional source.
    fn item_doc(attributes: &[(&str, Value)], file: Option<&str>) -> Document {
        let mut b = DocumentBuilder::new();
        let mut children: Vec<_> = attributes
            .iter()
            .enumerate()
            .map(|(i, (tag, value))| b.push_node(*tag, vec![value.clone()], i + 2))
            .collect();

        if let Some(file) = file {
            let line = attributes.len() + 2;
            let file = b.push_node("FILE", vec![Value::from(file)], line + 1);
            let source = b.push_node("SOURCE", vec![Value::from("WAVE")], line);
            b.set_children(source, vec![file]);
            children.push(source);
        }

        let item = b.push_node("ITEM", vec![], 1);
        b.set_children(item, children);
        b.build(item)
    }

    fn full_attributes() -> Vec<(&'static str, Value)> {
        vec![
            ("POSITION", Value::Float(12.5)),
            ("LENGTH", Value::Int(30)),
            ("NAME", Value::from("Song A")),
        ]
    }

    #[test]
    fn test_item_from_node() {
        let doc = item_doc(&full_attributes(), Some("/media/a.wav"));
        let item = Item::from_node(doc.root(), SourceFallback::Deny).unwrap();

        assert_eq!(item.name(), "Song A");
        assert!(approx_eq!(f64, item.position(), 12.5));
        assert!(approx_eq!(f64, item.length(), 30.0));
        assert!(approx_eq!(f64, item.end(), 42.5));
        assert_eq!(item.source(), "/media/a.wav");
        assert!(!item.source_is_fallback());
        assert_eq!(item.line(), 1);
    }

    #[test]
    fn test_missing_source_falls_back_to_name() {
        let doc = item_doc(&full_attributes(), None);
        let item = Item::from_node(doc.root(), SourceFallback::Name).unwrap();

        assert_eq!(item.source(), "Song A");
        assert!(item.source_is_fallback());
    }

    #[test]
    fn test_missing_source_denied() {
        let doc = item_doc(&full_attributes(), None);
        let err = Item::from_node(doc.root(), SourceFallback::Deny).unwrap_err();

        assert_eq!(
            err,
            InterpretError::MissingAttribute {
                node: "ITEM",
                attribute: "SOURCE FILE",
                line: 1,
            }
        );
    }

    #[test]
    fn test_numeric_name_is_rendered() {
        let mut attributes = full_attributes();
        attributes[2].1 = Value::Int(2020);
        let doc = item_doc(&attributes, Some("a.wav"));

        let item = Item::from_node(doc.root(), SourceFallback::Deny).unwrap();
        assert_eq!(item.name(), "2020");
    }

    #[test]
    fn test_missing_attribute() {
        let doc = item_doc(&full_attributes()[..2], Some("a.wav"));
        let err = Item::from_node(doc.root(), SourceFallback::Name).unwrap_err();

        assert!(matches!(
            err,
            InterpretError::MissingAttribute {
                attribute: "NAME",
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_position() {
        let mut attributes = full_attributes();
        attributes[0].1 = Value::from("soon");
        let doc = item_doc(&attributes, Some("a.wav"));

        let err = Item::from_node(doc.root(), SourceFallback::Name).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: `POSITION` of `ITEM` is not a number: `soon`"
        );
    }

    #[test]
    fn test_wrong_node_kind() {
        let mut b = DocumentBuilder::new();
        let track = b.push_node("TRACK", vec![], 7);
        let doc = b.build(track);

        let err = Item::from_node(doc.root(), SourceFallback::Name).unwrap_err();
        assert_eq!(
            err,
            InterpretError::WrongNodeKind {
                expected: "ITEM",
                found: "TRACK".to_string(),
                line: 7,
            }
        );
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let mut b = DocumentBuilder::new();
        let position = b.push_node("position", vec![Value::Int(1)], 2);
        let length = b.push_node("Length", vec![Value::Int(2)], 3);
        let name = b.push_node("name", vec![Value::from("x")], 4);
        let item = b.push_node("item", vec![], 1);
        b.set_children(item, vec![position, length, name]);
        let doc = b.build(item);

        let item = Item::from_node(doc.root(), SourceFallback::Name).unwrap();
        assert!(approx_eq!(f64, item.end(), 3.0));
    }
}
