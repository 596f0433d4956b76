//! Snapshot tree model
//!
//! A run operates on a single in-memory tree built from the filesystem in
//! one pass. Directory listings and file contents are both captured up
//! front, so the later passes (filter, estimate, select, render) never
//! touch the filesystem again and are insulated from concurrent changes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether a node is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// Why a node carries less data than the filesystem holds.
///
/// Read failures never abort a build; the affected node is kept in a
/// degraded form and the reason is recorded here so callers (and tests)
/// can tell degradation apart from genuinely empty entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Directory listing failed; the node is kept with no children.
    UnreadableDir(String),
    /// File read failed; the content is treated as empty.
    UnreadableFile(String),
    /// Invalid UTF-8 bytes were replaced during decoding.
    LossyDecode,
    /// Directory already visited through another link; not descended into.
    LinkCycle,
}

/// One filesystem entry in the snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Base name of the entry.
    pub name: String,
    /// Path as seen from the session root.
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Ordered children; always empty for files, name-sorted for directories.
    pub children: Vec<Node>,
    /// Approximate token cost of including this whole subtree.
    /// Meaningful only after the estimation pass has run.
    pub estimated_tokens: usize,
    /// Snapshot of the file's text; empty for directories.
    pub content: String,
    pub degradation: Option<Degradation>,
}

impl Node {
    fn file(name: String, path: &Path, content: String, degradation: Option<Degradation>) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            kind: NodeKind::File,
            children: Vec::new(),
            estimated_tokens: 0,
            content,
            degradation,
        }
    }

    fn dir(name: String, path: &Path, children: Vec<Node>, degradation: Option<Degradation>) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            kind: NodeKind::Directory,
            children,
            estimated_tokens: 0,
            content: String::new(),
            degradation,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Count nodes in this subtree that were kept in degraded form.
    pub fn degraded_count(&self) -> usize {
        let own = usize::from(self.degradation.is_some());
        own + self
            .children
            .iter()
            .map(Node::degraded_count)
            .sum::<usize>()
    }
}

/// Build the snapshot tree for `root` in a single pass.
///
/// Every directory is listed once (entries sorted by name for determinism)
/// and every regular file is read once. Failures degrade the affected node
/// instead of aborting the build.
pub fn snapshot(root: &Path) -> Node {
    let mut visited = HashSet::new();
    build(root, &mut visited)
}

fn build(path: &Path, visited: &mut HashSet<PathBuf>) -> Node {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if path.is_file() {
        let (content, degradation) = read_content(path);
        return Node::file(name, path, content, degradation);
    }

    // Guard against link cycles: a directory whose canonical path was
    // already seen in this build is kept but not descended into.
    if let Ok(real) = path.canonicalize() {
        if !visited.insert(real) {
            return Node::dir(name, path, Vec::new(), Some(Degradation::LinkCycle));
        }
    }

    match fs::read_dir(path) {
        Ok(entries) => {
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .collect();
            paths.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

            let children = paths.iter().map(|p| build(p, visited)).collect();
            Node::dir(name, path, children, None)
        }
        Err(err) => Node::dir(
            name,
            path,
            Vec::new(),
            Some(Degradation::UnreadableDir(err.to_string())),
        ),
    }
}

/// Read a file's text permissively: invalid UTF-8 is replaced, read errors
/// yield empty content. The reason is carried alongside the text.
fn read_content(path: &Path) -> (String, Option<Degradation>) {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => (text, None),
            Err(err) => {
                let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
                (text, Some(Degradation::LossyDecode))
            }
        },
        Err(err) => (
            String::new(),
            Some(Degradation::UnreadableFile(err.to_string())),
        ),
    }
}
