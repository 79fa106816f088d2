//! # RPP Parser
//!
//! Parser for REAPER project (`.rpp`) files. Turns the bracketed,
//! line-oriented text format into an [`rpp_core::Document`]:
//!
//! 1. **Extract** - flatten nested `<TAG ... >` blocks into a block table
//! 2. **Tokenize** - split every line into a tag and typed parameters
//! 3. **Assemble** - resolve nested block references into the node tree
//!
//! ## Usage
//!
//! ```
//! # use rpp_parser::{parse, ParseOptions, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "<REAPER_PROJECT 0.1\n<TRACK\nNAME \"Music Track\"\n>\n>";
//!     let doc = parse(source, &ParseOptions::default())?;
//!
//!     assert_eq!(doc.query(["TRACK", "NAME"]).len(), 1);
//!     Ok(())
//! }
//! ```

mod assemble;
pub mod error;
mod extract;
mod options;
mod span;
mod tokenizer;

pub use options::{DEFAULT_OPAQUE_TAGS, ParseOptions};
pub use span::Span;

use log::info;

use rpp_core::{Document, DocumentBuilder};

use error::ParseError;

/// Parse a project file into a [`Document`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every structural problem found: unclosed
/// blocks, stray `>` lines, content outside the root block, or a document
/// without any block.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let table = extract::extract(source, options)?;

    let mut builder = DocumentBuilder::new();
    let blocks = tokenizer::tokenize_blocks(&table, &mut builder);
    let document = assemble::assemble(builder, &blocks, table.root());

    info!(nodes = document.len(), root = document.root().tag(); "Parsed project file");
    Ok(document)
}
