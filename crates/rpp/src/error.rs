//! Error types for RPP operations.
//!
//! [`RppError`] is the error returned by [`ProjectReader`](crate::ProjectReader).
//! [`InterpretError`] describes a node that cannot be read as a domain record.

use std::io;

use thiserror::Error;

use rpp_parser::error::ParseError;

/// The main error type for RPP operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum RppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error("no track named `{0}`")]
    TrackNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RppError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// A node that does not have the shape a record expects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    #[error("line {line}: expected a `{expected}` node, found `{found}`")]
    WrongNodeKind {
        expected: &'static str,
        found: String,
        line: usize,
    },

    #[error("line {line}: `{node}` has no `{attribute}`")]
    MissingAttribute {
        node: &'static str,
        attribute: &'static str,
        line: usize,
    },

    #[error("line {line}: `{attribute}` of `{node}` is not a number: `{value}`")]
    InvalidAttribute {
        node: &'static str,
        attribute: &'static str,
        value: String,
        line: usize,
    },
}
