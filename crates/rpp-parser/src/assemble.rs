//! Tree assembly.
//!
//! Replaces every [`Entry::Block`] placeholder by the node of the block it
//! refers to. Nested blocks are tokenized before their parents, so each
//! placeholder maps straight to an existing node id and no placeholder can
//! survive into the finished [`Document`].

use log::debug;

use rpp_core::{Document, DocumentBuilder, NodeId};

use crate::{
    extract::BlockId,
    tokenizer::{Entry, TokenizedBlock},
};

/// Attach children to every block node and finish the document.
pub(crate) fn assemble(
    mut builder: DocumentBuilder,
    blocks: &[TokenizedBlock],
    root: BlockId,
) -> Document {
    let resolve = |entry: &Entry| -> NodeId {
        match *entry {
            Entry::Node(id) => id,
            Entry::Block(block) => blocks[block.index()].node,
        }
    };

    for block in blocks {
        if block.entries.is_empty() {
            continue;
        }
        let children = block.entries.iter().map(resolve).collect();
        builder.set_children(block.node, children);
    }

    let document = builder.build(blocks[root.index()].node);
    debug!(blocks = blocks.len(), nodes = document.len(); "Assembled document");
    document
}
