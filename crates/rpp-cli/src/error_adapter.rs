//! Error adapter for converting RppError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`rpp_parser::error::ParseError`] may hold several diagnostics, for
//! example one per unclosed block. Each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use rpp::RppError;
use rpp_parser::error::Diagnostic;

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Project source for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`RppError`] variants without source spans.
pub struct ErrorAdapter<'a>(pub &'a RppError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RppError::Io(_) => "rpp::io",
            RppError::Parse { .. } => return None,
            RppError::Interpret(_) => "rpp::interpret",
            RppError::TrackNotFound(_) => "rpp::track_not_found",
            RppError::Config(_) => "rpp::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            RppError::TrackNotFound(_) => Some(Box::new(
                "run `rpp <FILE> query TRACK NAME` to list the track names",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// Wraps either a single diagnostic or a non-diagnostic error, providing a
/// uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`RppError`] into a list of reportable errors.
///
/// [`RppError::Parse`] yields one [`Reportable`] per diagnostic; every other
/// variant yields a single [`Reportable`].
pub fn to_reportables(err: &RppError) -> Vec<Reportable<'_>> {
    match err {
        RppError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert a parser [`Span`](rpp_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: rpp_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

#[cfg(test)]
mod tests {
    use rpp_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("block `TRACK` is never closed")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..6), "opened here")
            .with_help("add a line containing only `>`");
        let err = RppError::new_parse_error(ParseError::from(diag), "<TRACK");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "block `TRACK` is never closed");
                assert_eq!(d.code().map(|c| c.to_string()), Some("E001".to_string()));
                assert!(d.source_code().is_some());
                assert!(d.severity().is_none());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("unexpected `>` with no open block")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(0..1), "nothing to close"),
            Diagnostic::error("block `ROOT` is never closed")
                .with_code(ErrorCode::E001)
                .with_label(Span::new(2..7), "opened here"),
        ];
        let err = RppError::new_parse_error(ParseError::from(diags), ">\n<ROOT");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[0].to_string(),
            "unexpected `>` with no open block"
        );
        assert_eq!(reportables[1].to_string(), "block `ROOT` is never closed");
    }

    #[test]
    fn test_non_parse_error() {
        let err = RppError::TrackNotFound("Drums".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "no track named `Drums`");
                assert_eq!(
                    e.code().map(|c| c.to_string()),
                    Some("rpp::track_not_found".to_string())
                );
                assert!(e.help().is_some());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("second top-level block `OTHER`")
            .with_label(Span::new(10..16), "outside the root block")
            .with_secondary_label(Span::new(0..5), "root block");

        let adapter = DiagnosticAdapter::new(&diag, "<ROOT\n>\n<OTHER\n>");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("outside the root block"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_renders_with_snippet() {
        let source = "<ROOT\n<TRACK\n>";
        let diag = Diagnostic::error("block `ROOT` is never closed")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..5), "opened here");
        let err = RppError::new_parse_error(ParseError::from(diag), source);

        let reporter = miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
        let mut out = String::new();
        for reportable in to_reportables(&err) {
            reporter.render_report(&mut out, &reportable).unwrap();
        }

        assert!(out.contains("E001"));
        assert!(out.contains("opened here"));
        assert!(out.contains("<ROOT"));
    }
}
