//! Default ignore filter
//!
//! Removes known noise entries before token estimation or any prompt is
//! shown, so ignored items never appear in cost figures or option lists.
//! The pass is a pure transformation and is idempotent.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

use crate::core::tree::{Node, NodeKind};

/// Directory names skipped entirely; the subtree is never descended into.
static IGNORED_DIRS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| [".git", "node_modules", "__pycache__"].into_iter().collect());

/// File names skipped exactly (known sensitive config and the like).
static IGNORED_FILE_NAMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["local.settings.json"].into_iter().collect());

/// File extensions skipped by default, leading dot included.
static IGNORED_EXTENSIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| [".pyc", ".o", ".exe"].into_iter().collect());

/// Apply the default ignore rules to a built tree.
///
/// Returns `None` when the node itself is ignored (for a directory that
/// drops the whole subtree). Extension matching is case-insensitive.
pub fn apply(node: Node) -> Option<Node> {
    match node.kind {
        NodeKind::File => {
            if IGNORED_FILE_NAMES.contains(node.name.as_str()) {
                return None;
            }
            if let Some(ext) = dotted_extension(&node.name) {
                if IGNORED_EXTENSIONS.contains(ext.as_str()) {
                    return None;
                }
            }
            Some(node)
        }
        NodeKind::Directory => {
            if IGNORED_DIRS.contains(node.name.as_str()) {
                return None;
            }
            let mut node = node;
            node.children = node.children.into_iter().filter_map(apply).collect();
            Some(node)
        }
    }
}

/// Lowercased extension with its leading dot, e.g. `.pyc`.
/// Dotfiles such as `.gitignore` have no extension.
fn dotted_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}
