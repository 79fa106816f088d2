//! Collector for accumulating diagnostics during block extraction.
//!
//! The extractor keeps scanning after a structural problem so that every
//! stray `>` and every unclosed block is reported in one run.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` once any diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Finish collection and return a result.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
