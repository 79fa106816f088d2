//! Error and diagnostic system for the RPP parser.
//!
//! Structural problems in a project file (unbalanced blocks, text outside
//! the root block) are reported as [`Diagnostic`]s carrying an
//! [`ErrorCode`], labeled source spans and optional help text. One parse may
//! report several problems; they are returned together in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use rpp_parser::error::{Diagnostic, ErrorCode};
//! # use rpp_parser::Span;
//!
//! let diag = Diagnostic::error("block `TRACK` is never closed")
//!     .with_code(ErrorCode::E001)
//!     .with_label(Span::new(10..16), "opened here")
//!     .with_help("add a line containing only `>`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
