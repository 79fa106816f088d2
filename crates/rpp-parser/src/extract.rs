//! Block extraction.
//!
//! Flattens the bracket nesting of a project file into an ordered table of
//! raw blocks. A line starting with `<` opens a block and a line holding
//! only `>` closes the innermost one. When a block closes it is appended to
//! the table and its parent receives a [`BlockId`] placeholder in its place,
//! so nested blocks always precede their parents and the root block comes
//! last.
//!
//! Blocks whose tag is opaque (see [`ParseOptions`]) are collected
//! verbatim: `<` and `>` lines inside them only adjust a depth counter.
//!
//! Extraction is a single pass over the lines and cannot loop. Structural
//! problems are collected so every one of them is reported together.

use log::debug;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    options::ParseOptions,
    span::Span,
};

/// Placeholder reference to an extracted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockId(usize);

impl BlockId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One non-blank line of the source, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'src> {
    /// 1-based physical line number.
    pub number: usize,
    pub text: &'src str,
    /// Span of `text` in the source.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawLine<'src> {
    Text(SourceLine<'src>),
    Block(BlockId),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawBody<'src> {
    Lines(Vec<RawLine<'src>>),
    Opaque(Vec<SourceLine<'src>>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawBlock<'src> {
    /// The opening line with its `<` removed. The span still covers the `<`.
    pub header: SourceLine<'src>,
    pub body: RawBody<'src>,
}

/// Extracted blocks, innermost first, plus the root placeholder.
#[derive(Debug)]
pub(crate) struct BlockTable<'src> {
    blocks: Vec<RawBlock<'src>>,
    root: BlockId,
}

impl<'src> BlockTable<'src> {
    pub(crate) fn blocks(&self) -> &[RawBlock<'src>] {
        &self.blocks
    }

    pub(crate) fn root(&self) -> BlockId {
        self.root
    }
}

/// Split `source` into trimmed, non-blank lines with their spans.
///
/// Handles `\n` and `\r\n` line endings. A lone `\r` is ordinary text.
pub(crate) fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().filter_map(move |(index, raw)| {
        let start = offset;
        offset += raw.len() + 1;

        let trimmed_start = raw.trim_start();
        let text = trimmed_start.trim_end();
        if text.is_empty() {
            return None;
        }

        let start = start + (raw.len() - trimmed_start.len());
        Some(SourceLine {
            number: index + 1,
            text,
            span: Span::new(start..start + text.len()),
        })
    })
}

/// Extract the block table from a project file.
pub(crate) fn extract<'src>(
    source: &'src str,
    options: &ParseOptions,
) -> Result<BlockTable<'src>, ParseError> {
    let mut extractor = Extractor::new(options);
    for line in source_lines(source) {
        extractor.feed(line);
    }
    extractor.finish(source.len())
}

struct Frame<'src> {
    header: SourceLine<'src>,
    body: RawBody<'src>,
    /// Nesting depth inside an opaque body.
    raw_depth: usize,
}

impl<'src> Frame<'src> {
    fn tag(&self) -> &'src str {
        header_tag(self.header.text)
    }

    fn is_opaque(&self) -> bool {
        matches!(self.body, RawBody::Opaque(_))
    }
}

enum Step {
    Open,
    Close,
    Text,
    Raw,
}

struct Extractor<'src, 'o> {
    options: &'o ParseOptions,
    collector: DiagnosticCollector,
    blocks: Vec<RawBlock<'src>>,
    stack: Vec<Frame<'src>>,
    root: Option<BlockId>,
}

impl<'src, 'o> Extractor<'src, 'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            collector: DiagnosticCollector::new(),
            blocks: Vec::new(),
            stack: Vec::new(),
            root: None,
        }
    }

    fn feed(&mut self, line: SourceLine<'src>) {
        let closes = line.text == ">";
        let step = match self.stack.last() {
            Some(frame) if frame.is_opaque() => {
                if closes && frame.raw_depth == 0 {
                    Step::Close
                } else {
                    Step::Raw
                }
            }
            _ if closes => Step::Close,
            _ if line.text.starts_with('<') => Step::Open,
            _ => Step::Text,
        };

        match step {
            Step::Open => self.open(line),
            Step::Close => self.close(line),
            Step::Text => self.text(line),
            Step::Raw => self.raw(line),
        }
    }

    fn open(&mut self, line: SourceLine<'src>) {
        let header = SourceLine {
            text: &line.text[1..],
            ..line
        };
        let body = if self.options.is_opaque(header_tag(header.text)) {
            RawBody::Opaque(Vec::new())
        } else {
            RawBody::Lines(Vec::new())
        };

        self.stack.push(Frame {
            header,
            body,
            raw_depth: 0,
        });
    }

    fn close(&mut self, line: SourceLine<'src>) {
        let Some(frame) = self.stack.pop() else {
            self.collector.emit(
                Diagnostic::error("unexpected `>` with no open block")
                    .with_code(ErrorCode::E002)
                    .with_label(line.span, "nothing to close")
                    .with_help("remove this line or add the missing `<TAG` line above it"),
            );
            return;
        };

        let id = BlockId(self.blocks.len());
        self.blocks.push(RawBlock {
            header: frame.header,
            body: frame.body,
        });

        match self.stack.last_mut() {
            Some(Frame {
                body: RawBody::Lines(lines),
                ..
            }) => lines.push(RawLine::Block(id)),
            // Opaque frames never hold nested frames.
            Some(_) => {}
            None => self.set_root(id),
        }
    }

    fn text(&mut self, line: SourceLine<'src>) {
        match self.stack.last_mut() {
            Some(Frame {
                body: RawBody::Lines(lines),
                ..
            }) => lines.push(RawLine::Text(line)),
            Some(_) => {}
            None => {
                let mut diag = Diagnostic::error("text outside the root block")
                    .with_code(ErrorCode::E003)
                    .with_label(line.span, "not inside any block")
                    .with_help("a project file holds exactly one outermost block");
                if let Some(root) = self.root {
                    diag = diag.with_secondary_label(self.header_span(root), "root block");
                }
                self.collector.emit(diag);
            }
        }
    }

    fn raw(&mut self, line: SourceLine<'src>) {
        if let Some(frame) = self.stack.last_mut() {
            if line.text == ">" {
                frame.raw_depth = frame.raw_depth.saturating_sub(1);
            } else if line.text.starts_with('<') {
                frame.raw_depth += 1;
            }
            if let RawBody::Opaque(lines) = &mut frame.body {
                lines.push(line);
            }
        }
    }

    fn set_root(&mut self, id: BlockId) {
        match self.root {
            None => self.root = Some(id),
            Some(root) => {
                let block = &self.blocks[id.0];
                self.collector.emit(
                    Diagnostic::error(format!(
                        "second top-level block `{}`",
                        header_tag(block.header.text)
                    ))
                    .with_code(ErrorCode::E003)
                    .with_label(block.header.span, "outside the root block")
                    .with_secondary_label(self.header_span(root), "root block")
                    .with_help("a project file holds exactly one outermost block"),
                );
            }
        }
    }

    fn header_span(&self, id: BlockId) -> Span {
        self.blocks[id.0].header.span
    }

    fn finish(mut self, source_len: usize) -> Result<BlockTable<'src>, ParseError> {
        for frame in std::mem::take(&mut self.stack) {
            self.collector.emit(
                Diagnostic::error(format!("block `{}` is never closed", frame.tag()))
                    .with_code(ErrorCode::E001)
                    .with_label(frame.header.span, "opened here")
                    .with_help("add a line containing only `>` after the block body"),
            );
        }

        let Some(root) = self.root else {
            if !self.collector.has_errors() {
                self.collector.emit(empty_document(source_len));
            }
            return Err(self
                .collector
                .finish()
                .err()
                .unwrap_or_else(|| empty_document(source_len).into()));
        };
        self.collector.finish()?;

        debug!(blocks = self.blocks.len(); "Extracted blocks");
        Ok(BlockTable {
            blocks: self.blocks,
            root,
        })
    }
}

/// First space-delimited word of a header line.
fn header_tag(header: &str) -> &str {
    header.split(' ').next().unwrap_or_default()
}

fn empty_document(source_len: usize) -> Diagnostic {
    Diagnostic::error("the document contains no block")
        .with_code(ErrorCode::E004)
        .with_label(Span::new(0..source_len), "no `<TAG` line found")
        .with_help("a project file starts with a line such as `<REAPER_PROJECT 0.1`")
}
