//! Token estimation for interactive budgeting
//!
//! Every node is annotated with the approximate token cost of including
//! its whole subtree in the final output. The count is taken over the
//! exact text block that full inclusion would emit, so connector glyphs
//! and indentation are priced in. Because that decoration depends on a
//! node's depth and position among siblings, the numbers do not compose
//! additively; each subtree is re-rendered from scratch instead.

use std::path::Path;

use crate::core::render::file_block_lines;
use crate::core::tree::{Node, NodeKind};

/// Size estimation seam. The shipped implementation is a whitespace-split
/// approximation; a real tokenizer can be substituted here without
/// touching any traversal logic.
pub trait TokenEstimator {
    /// Approximate token count of a block of text.
    fn estimate(&self, text: &str) -> usize;
}

/// Whitespace-delimited token approximation. This is a coarse size signal,
/// not a subword tokenizer, and matches no particular model.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceEstimator;

impl TokenEstimator for WhitespaceEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Annotate `node` and every descendant (pre-order) with the estimated
/// cost of its own full-inclusion rendering. Pure: consumes the tree and
/// returns a new one.
pub fn annotate(mut node: Node, root: &Path, estimator: &dyn TokenEstimator) -> Node {
    node.estimated_tokens = estimator.estimate(&full_inclusion_text(&node, root));
    node.children = node
        .children
        .into_iter()
        .map(|child| annotate(child, root, estimator))
        .collect();
    node
}

/// The exact text block that would be emitted if this node's subtree were
/// fully included: for a directory, its own connector line followed by the
/// position-decorated walk of all descendants (file entries contribute
/// their tree line plus a fenced content block); for a file, the labeled
/// fenced block alone.
pub fn full_inclusion_text(node: &Node, root: &Path) -> String {
    let mut lines = Vec::new();
    match node.kind {
        NodeKind::File => file_block_lines(node, root, &mut lines),
        NodeKind::Directory => walk(node, "", true, root, &mut lines),
    }
    lines.join("\n")
}

fn walk(node: &Node, prefix: &str, is_last: bool, root: &Path, lines: &mut Vec<String>) {
    let connector = if is_last { "└── " } else { "├── " };
    lines.push(format!("{prefix}{connector}{}", node.name));

    match node.kind {
        NodeKind::Directory => {
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            let count = node.children.len();
            for (idx, child) in node.children.iter().enumerate() {
                walk(child, &child_prefix, idx + 1 == count, root, lines);
            }
        }
        NodeKind::File => file_block_lines(node, root, lines),
    }
}
