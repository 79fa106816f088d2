//! RPP CLI library
//!
//! This module contains the core CLI logic for the RPP project inspector.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::io::Write;

use log::info;

use rpp::{Body, Document, NodeRef, ProjectReader, RppError, Value};

/// Run the RPP CLI application
///
/// Reads the input project and writes the output of the selected command
/// to `out`.
///
/// # Errors
///
/// Returns `RppError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Unknown track names and items that cannot be read
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), RppError> {
    info!(input_path = args.input; "Inspecting project");

    let app_config = config::load_config(args.config.as_ref())?;
    let reader = ProjectReader::new(app_config);
    let doc = reader.read_file(&args.input)?;

    match &args.command {
        Command::Query { tags, track } => {
            let nodes = match track {
                Some(name) => reader
                    .find_track(&doc, name)
                    .ok_or_else(|| RppError::TrackNotFound(name.clone()))?
                    .query(tags),
                None => doc.query(tags),
            };
            info!(matches = nodes.len(); "Query finished");
            for node in nodes {
                writeln!(out, "{:>6}  {}", node.line(), render_line(node))?;
            }
        }
        Command::Items { track } => {
            for item in reader.track_items(&doc, track)? {
                let fallback = if item.source_is_fallback() {
                    " (name)"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "{:>10.3} {:>10.3}  {}  {}{}",
                    item.position(),
                    item.end(),
                    item.name(),
                    item.source(),
                    fallback
                )?;
            }
        }
        Command::Markers => {
            for marker in reader.markers(&doc)? {
                let kind = if marker.is_region() { "region" } else { "marker" };
                writeln!(
                    out,
                    "{:>4} {:>10.3}  {:<6}  {}",
                    marker.index(),
                    marker.position(),
                    kind,
                    marker.name()
                )?;
            }
        }
        Command::Tree { depth } => write_tree(out, &doc, *depth)?,
    }

    Ok(())
}

/// Print the document tree, indenting two spaces per level.
fn write_tree(out: &mut impl Write, doc: &Document, max_depth: Option<usize>) -> std::io::Result<()> {
    let mut stack = vec![(doc.root(), 0)];
    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match node.body() {
            Body::Payload(payload) => writeln!(
                out,
                "{indent}{} [{} bytes]",
                render_line(node),
                payload.len()
            )?,
            Body::Children(_) => writeln!(out, "{indent}{}", render_line(node))?,
        }

        if max_depth.is_none_or(|max| depth < max) {
            stack.extend(node.children().rev().map(|child| (child, depth + 1)));
        }
    }
    Ok(())
}

/// Render a node as a project-file line: its tag followed by its parameters.
fn render_line(node: NodeRef<'_>) -> String {
    let mut line = node.tag().to_string();
    for param in node.params() {
        line.push(' ');
        match param {
            Value::Str(s) if s.is_empty() || s.contains(' ') => {
                line.push('"');
                line.push_str(s);
                line.push('"');
            }
            other => line.push_str(&other.to_string()),
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use rpp::ParseOptions;

    use super::*;

    #[test]
    fn test_render_line_quotes_strings_with_spaces() {
        let doc = rpp_parser::parse(
            "<ROOT\nMARKER 1 10.5 \"Verse 1\" \"\" plain\n>",
            &ParseOptions::default(),
        )
        .unwrap();

        let marker = doc.query(["MARKER"])[0];
        assert_eq!(render_line(marker), r#"MARKER 1 10.5 "Verse 1" "" plain"#);
    }

    #[test]
    fn test_write_tree_depth() {
        let doc = rpp_parser::parse(
            "<ROOT\n<TRACK\nNAME a\n<VST x\nAAAA\n>\n>\n>",
            &ParseOptions::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        write_tree(&mut out, &doc, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ROOT\n  TRACK\n    NAME a\n    VST x [4 bytes]\n"
        );

        let mut out = Vec::new();
        write_tree(&mut out, &doc, Some(1)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ROOT\n  TRACK\n");
    }
}
