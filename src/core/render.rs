//! Renderer module
//!
//! Produces the two sections of the final artifact: the `<file_map>` ASCII
//! tree and the `<file_contents>` dump of every kept file. Content is taken
//! verbatim from the snapshot; it is wrapped, never transformed.

use std::path::Path;

use crate::core::paths::display_relative;
use crate::core::tree::Node;

/// Render the combined artifact: file map, blank line, file contents.
pub fn render_output(root_node: &Node, root: &Path) -> String {
    format!(
        "{}\n\n{}",
        render_file_map(root_node),
        render_file_contents(root_node, root)
    )
}

/// Render the `<file_map>` section. The root is shown with its full path;
/// every other node gets a connector glyph and the cumulative prefix of its
/// ancestors' last-child status.
pub fn render_file_map(root_node: &Node) -> String {
    let mut lines = vec!["<file_map>".to_string()];
    tree_lines(root_node, "", true, true, &mut lines);
    lines.push("</file_map>".to_string());
    lines.join("\n")
}

fn tree_lines(node: &Node, prefix: &str, is_last: bool, is_root: bool, lines: &mut Vec<String>) {
    if is_root {
        lines.push(node.path.display().to_string());
    } else {
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{prefix}{connector}{}", node.name));
    }

    if node.is_dir() && !node.children.is_empty() {
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = node.children.len();
        for (idx, child) in node.children.iter().enumerate() {
            tree_lines(child, &child_prefix, idx + 1 == count, false, lines);
        }
    }
}

/// Render the `<file_contents>` section: every remaining file, sorted
/// lexicographically by path, as a labeled fenced block.
pub fn render_file_contents(root_node: &Node, root: &Path) -> String {
    let mut files = Vec::new();
    collect_files(root_node, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut lines = vec!["<file_contents>".to_string()];
    for node in files {
        file_block_lines(node, root, &mut lines);
    }
    lines.push("</file_contents>".to_string());
    lines.join("\n")
}

fn collect_files<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if node.is_file() {
        out.push(node);
    }
    for child in &node.children {
        collect_files(child, out);
    }
}

/// Append one file's header, fenced content, and closing fence.
///
/// Shared with the estimator so the counted text and the emitted text
/// cannot drift apart.
pub(crate) fn file_block_lines(node: &Node, root: &Path, lines: &mut Vec<String>) {
    lines.push(format!("File: {}", display_relative(&node.path, root)));
    lines.push(format!("```{}", fence_tag(&node.name)));
    lines.push(node.content.clone());
    lines.push("```\n".to_string());
}

/// Fence language tag derived from the file extension, or `text` when the
/// file has none.
pub(crate) fn fence_tag(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "text".to_string())
}
