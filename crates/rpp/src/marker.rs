//! Project markers and region bounds.
//!
//! Markers are plain lines of the project block:
//!
//! ```text
//! MARKER 1 10.5 "Intro" 0
//! MARKER 2 60 "Chorus" 1
//! MARKER 2 90 "" 1
//! ```
//!
//! A region is stored as two `MARKER` lines sharing an index, both with the
//! region flag set.

use rpp_core::{NodeRef, Value};

use crate::error::InterpretError;

const REGION_FLAG: i64 = 1;

/// A marker read from a `MARKER` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    index: i64,
    position: f64,
    name: String,
    flags: i64,
    line: usize,
}

impl Marker {
    /// Read a marker from a `MARKER` node.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpretError`] if the node is not a `MARKER` or its
    /// index or position is missing or not a number.
    pub fn from_node(node: NodeRef<'_>) -> Result<Self, InterpretError> {
        if !node.has_tag("MARKER") {
            return Err(InterpretError::WrongNodeKind {
                expected: "MARKER",
                found: node.tag().to_string(),
                line: node.line(),
            });
        }

        let index = required(node, 0, "index")?;
        let index = index
            .as_i64()
            .ok_or_else(|| invalid(node, "index", index))?;
        let position = required(node, 1, "position")?;
        let position = position
            .as_f64()
            .ok_or_else(|| invalid(node, "position", position))?;

        Ok(Self {
            index,
            position,
            name: node.param(2).map(Value::to_string).unwrap_or_default(),
            flags: node.param(3).and_then(Value::as_i64).unwrap_or(0),
            line: node.line(),
        })
    }

    /// Marker number shown in the timeline. A region shares it with both of its bounds.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Display name, empty when the line has none.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw flag bits. Bit 0 marks a region bound.
    pub fn flags(&self) -> i64 {
        self.flags
    }

    /// Returns `true` if this line bounds a region rather than marking a point.
    pub fn is_region(&self) -> bool {
        self.flags & REGION_FLAG != 0
    }

    /// Source line of the `MARKER` node.
    pub fn line(&self) -> usize {
        self.line
    }
}

fn required<'doc>(
    node: NodeRef<'doc>,
    index: usize,
    attribute: &'static str,
) -> Result<&'doc Value, InterpretError> {
    node.param(index).ok_or(InterpretError::MissingAttribute {
        node: "MARKER",
        attribute,
        line: node.line(),
    })
}

fn invalid(node: NodeRef<'_>, attribute: &'static str, value: &Value) -> InterpretError {
    InterpretError::InvalidAttribute {
        node: "MARKER",
        attribute,
        value: value.to_string(),
        line: node.line(),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rpp_core::{Document, DocumentBuilder};

    use super::*;

    fn marker_doc(tag: &str, params: Vec<Value>) -> Document {
        let mut b = DocumentBuilder::new();
        let marker = b.push_node(tag, params, 3);
        b.build(marker)
    }

    #[test]
    fn test_marker_from_node() {
        let doc = marker_doc(
            "MARKER",
            vec![
                Value::Int(1),
                Value::Float(10.5),
                Value::from("Intro"),
                Value::Int(0),
            ],
        );
        let marker = Marker::from_node(doc.root()).unwrap();

        assert_eq!(marker.index(), 1);
        assert!(approx_eq!(f64, marker.position(), 10.5));
        assert_eq!(marker.name(), "Intro");
        assert!(!marker.is_region());
        assert_eq!(marker.line(), 3);
    }

    #[test]
    fn test_quoted_numeric_position() {
        // `MARKER 1 "12.5" 0 "" 0`: the quoted position is still a number.
        let doc = marker_doc(
            "MARKER",
            vec![
                Value::Int(1),
                Value::Float(12.5),
                Value::Int(0),
                Value::from(""),
                Value::Int(0),
            ],
        );
        let marker = Marker::from_node(doc.root()).unwrap();

        assert!(approx_eq!(f64, marker.position(), 12.5));
        assert_eq!(marker.name(), "0");
        assert_eq!(marker.flags(), 0);
    }

    #[test]
    fn test_region_flag() {
        let doc = marker_doc(
            "MARKER",
            vec![
                Value::Int(2),
                Value::Int(60),
                Value::from("Chorus"),
                Value::Int(1),
            ],
        );
        assert!(Marker::from_node(doc.root()).unwrap().is_region());
    }

    #[test]
    fn test_optional_fields_default() {
        let doc = marker_doc("marker", vec![Value::Int(3), Value::Int(5)]);
        let marker = Marker::from_node(doc.root()).unwrap();

        assert_eq!(marker.name(), "");
        assert_eq!(marker.flags(), 0);
    }

    #[test]
    fn test_missing_position() {
        let doc = marker_doc("MARKER", vec![Value::Int(3)]);
        let err = Marker::from_node(doc.root()).unwrap_err();

        assert_eq!(
            err,
            InterpretError::MissingAttribute {
                node: "MARKER",
                attribute: "position",
                line: 3,
            }
        );
    }

    #[test]
    fn test_non_numeric_index() {
        let doc = marker_doc("MARKER", vec![Value::from("x"), Value::Int(1)]);
        let err = Marker::from_node(doc.root()).unwrap_err();

        assert!(matches!(
            err,
            InterpretError::InvalidAttribute {
                attribute: "index",
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_node_kind() {
        let doc = marker_doc("TEMPO", vec![Value::Int(120)]);
        assert!(matches!(
            Marker::from_node(doc.root()),
            Err(InterpretError::WrongNodeKind { .. })
        ));
    }
}
