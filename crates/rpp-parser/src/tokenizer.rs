//! Line tokenizer.
//!
//! Splits block headers and body lines into a tag plus typed parameters and
//! registers every resulting node with the [`DocumentBuilder`].
//!
//! A line is split on single spaces. A token opening with `"`, `'` or
//! `` ` `` runs to the next unescaped occurrence of the same quote, which
//! must be followed by a space or the end of the line; anything else is a
//! plain token, so an unterminated quote is kept verbatim.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, opt, preceded, repeat, separated},
    error::{ContextError, ErrMode},
    token::{none_of, one_of, take_till},
};

use rpp_core::{DocumentBuilder, NodeId, Value};

use crate::extract::{BlockId, BlockTable, RawBody, RawLine};

type Input<'src> = &'src str;
type IResult<O> = Result<O, ErrMode<ContextError>>;

const QUOTES: [char; 3] = ['"', '\'', '`'];

/// One child entry of a tokenized block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// A plain line, already a node.
    Node(NodeId),
    /// A nested block, resolved during assembly.
    Block(BlockId),
}

/// A block after tokenization, still referring to nested blocks by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenizedBlock {
    pub node: NodeId,
    pub entries: Vec<Entry>,
}

/// Tokenize every block of `table`, in table order.
///
/// The returned vector is indexed by [`BlockId`].
pub(crate) fn tokenize_blocks(
    table: &BlockTable<'_>,
    builder: &mut DocumentBuilder,
) -> Vec<TokenizedBlock> {
    table
        .blocks()
        .iter()
        .map(|block| {
            let (tag, params) = split_line(block.header.text);
            match &block.body {
                RawBody::Opaque(lines) => {
                    let payload: String = lines.iter().map(|line| line.text).collect();
                    TokenizedBlock {
                        node: builder.push_opaque(tag, params, block.header.number, payload),
                        entries: Vec::new(),
                    }
                }
                RawBody::Lines(lines) => {
                    let node = builder.push_node(tag, params, block.header.number);
                    let entries = lines
                        .iter()
                        .map(|line| match line {
                            RawLine::Text(line) => {
                                let (tag, params) = split_line(line.text);
                                Entry::Node(builder.push_node(tag, params, line.number))
                            }
                            RawLine::Block(id) => Entry::Block(*id),
                        })
                        .collect();
                    TokenizedBlock { node, entries }
                }
            }
        })
        .collect()
}

/// Split a line into its tag and coerced parameters.
pub(crate) fn split_line(line: &str) -> (String, Vec<Value>) {
    let mut tokens = tokenize_line(line).into_iter();
    let tag = tokens.next().unwrap_or_default();
    (tag, tokens.map(coerce).collect())
}

/// Split a line into raw tokens, quotes removed.
pub(crate) fn tokenize_line(line: &str) -> Vec<String> {
    let mut input = line;
    // A bare token may be empty, so this cannot fail.
    tokens.parse_next(&mut input).unwrap_or_default()
}

/// Type a token by its lexical shape.
pub(crate) fn coerce(token: String) -> Value {
    if float_literal.parse(token.as_str()).is_ok() {
        return token
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or(Value::Str(token));
    }
    if int_literal.parse(token.as_str()).is_ok() {
        return match token.parse::<i64>() {
            Ok(int) => Value::Int(int),
            Err(_) => token
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or(Value::Str(token)),
        };
    }
    Value::Str(token)
}

fn tokens(input: &mut Input<'_>) -> IResult<Vec<String>> {
    separated(1.., token, ' ').parse_next(input)
}

fn token(input: &mut Input<'_>) -> IResult<String> {
    alt((quoted, bare)).parse_next(input)
}

fn bare(input: &mut Input<'_>) -> IResult<String> {
    take_till(0.., ' ').map(str::to_string).parse_next(input)
}

fn quoted(input: &mut Input<'_>) -> IResult<String> {
    let quote = one_of(QUOTES).parse_next(input)?;

    let body = repeat(0.., alt((preceded('\\', one_of(quote)), none_of(quote))))
        .fold(String::new, |mut acc: String, ch: char| {
            acc.push(ch);
            acc
        })
        .parse_next(input)?;
    one_of(quote).parse_next(input)?;

    if input.is_empty() || input.starts_with(' ') {
        Ok(body)
    } else {
        Err(ErrMode::Backtrack(ContextError::new()))
    }
}

/// `-?\d*\.\d+`
fn float_literal(input: &mut Input<'_>) -> IResult<()> {
    (opt('-'), digit0, '.', digit1).void().parse_next(input)
}

/// `-?\d+`
fn int_literal(input: &mut Input<'_>) -> IResult<()> {
    (opt('-'), digit1).void().parse_next(input)
}
