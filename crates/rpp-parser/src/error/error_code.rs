//! Error codes for RPP parse diagnostics.
//!
//! All current codes are structural (`E0xx`): they describe how the bracket
//! nesting of a project file fails to form a single tree.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unclosed block.
    ///
    /// A line opened a block with `<` but no matching `>` line follows.
    E001,

    /// Unexpected closing bracket.
    ///
    /// A `>` line was found while no block was open.
    E002,

    /// Content outside the root block.
    ///
    /// A plain line or a second block appears at the top level. A project
    /// file must consist of exactly one outermost block.
    E003,

    /// Empty document.
    ///
    /// The input contains no block at all.
    E004,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unclosed block",
            ErrorCode::E002 => "unexpected closing bracket",
            ErrorCode::E003 => "content outside root block",
            ErrorCode::E004 => "empty document",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
