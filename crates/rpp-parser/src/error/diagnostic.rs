//! The core diagnostic type for the RPP error system.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A structural error with source location information.
///
/// Every diagnostic aborts the parse; there are no advisory levels.
///
/// # Example
///
/// ```text
/// error[E001]: block `ITEM` is never closed
///   --> show.rpp:12:1
///    |
/// 12 | <ITEM
///    | ^^^^^ opened here
///    |
///    = help: add a line containing only `>` after the block body
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("unexpected content outside the root block")
            .with_code(ErrorCode::E003)
            .with_label(Span::new(100..120), "outside the root block")
            .with_secondary_label(Span::new(0..8), "root block starts here")
            .with_help("a project file holds exactly one outermost block");

        assert_eq!(diag.code(), Some(ErrorCode::E003));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            diag.help(),
            Some("a project file holds exactly one outermost block")
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("block `ITEM` is never closed").with_code(ErrorCode::E001);
        assert_eq!(
            with_code.to_string(),
            "error[E001]: block `ITEM` is never closed"
        );

        let without_code = Diagnostic::error("no bracketed block found");
        assert_eq!(without_code.to_string(), "error: no bracketed block found");
    }
}
