//! Tag-chain selectors and the containment filter.
//!
//! A tag chain is an ordered list of tag names. The first name filters the
//! initial candidate set; every following name is matched against the
//! *direct* children of the previous matches. Tag comparison ignores ASCII
//! case.
//!
//! Two entry points differ only in their initial candidates:
//! - [`Document::query`](crate::document::Document::query) starts from the
//!   flat index, so the first tag matches at any depth.
//! - [`query_within`] starts from one node's direct children, so results
//!   never leave that node's subtree.
//!
//! Queries never fail; an empty result is a valid answer.

use log::trace;

use crate::{document::NodeRef, value::Value};

/// Scoped tag-chain search.
///
/// Matches `chain` starting from the direct children of `node`. With an
/// empty chain, all direct children are returned.
pub fn query_within<'doc, I, S>(node: NodeRef<'doc>, chain: I) -> Vec<NodeRef<'doc>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    select(node.children().collect(), chain)
}

/// Keep the nodes that have a direct child tagged `subtag` whose parameters
/// include `value`.
///
/// Only direct children are inspected; nodes without children (including
/// opaque nodes) are always excluded. Parameter equality follows
/// [`Value`]'s `PartialEq`.
pub fn contains_child<'doc, I>(nodes: I, subtag: &str, value: impl Into<Value>) -> Vec<NodeRef<'doc>>
where
    I: IntoIterator<Item = NodeRef<'doc>>,
{
    let value = value.into();
    nodes
        .into_iter()
        .filter(|node| {
            node.children()
                .filter(|child| child.has_tag(subtag))
                .any(|child| child.params().contains(&value))
        })
        .collect()
}

/// Run a tag chain over an initial candidate set.
pub(crate) fn select<'doc, I, S>(candidates: Vec<NodeRef<'doc>>, chain: I) -> Vec<NodeRef<'doc>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut chain = chain.into_iter().peekable();
    let mut matches = candidates;

    while let Some(tag) = chain.next() {
        let tag = tag.as_ref();
        matches.retain(|node| node.has_tag(tag));
        trace!(tag = tag, matches = matches.len(); "Filtered candidates");

        if chain.peek().is_some() {
            matches = matches.iter().flat_map(|node| node.children()).collect();
        }
    }

    matches
}
