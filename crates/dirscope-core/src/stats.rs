//! Aggregate statistics over a scanned tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeKind};

/// Histogram key used for files without an extension.
pub const NO_EXTENSION: &str = "(none)";

/// Summary statistics for a scanned tree.
///
/// The scan root itself is never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories.
    pub total_dirs: u64,
    /// Total number of symbolic links.
    pub total_symlinks: u64,
    /// Sum of all file sizes in bytes.
    pub total_size: u64,
    /// File count per lower-cased extension.
    pub extension_counts: BTreeMap<String, u64>,
    /// Deepest node depth seen.
    pub max_depth: u32,
    /// Largest file (path relative to the root, size).
    #[serde(default)]
    pub largest_file: Option<(String, u64)>,
}

impl Stats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, relative_path: String, node: &Node) {
        self.total_files += 1;
        self.total_size += node.size;
        self.max_depth = self.max_depth.max(node.depth);

        let ext = node.extension().unwrap_or_else(|| NO_EXTENSION.to_string());
        *self.extension_counts.entry(ext).or_default() += 1;

        // Track largest file
        if self.largest_file.as_ref().is_none_or(|(_, s)| node.size > *s) {
            self.largest_file = Some((relative_path, node.size));
        }
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink.
    pub fn record_symlink(&mut self, depth: u32) {
        self.total_symlinks += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Number of distinct extension buckets.
    pub fn extension_kinds(&self) -> usize {
        self.extension_counts.len()
    }
}

/// Walk a built tree once and compute its statistics.
pub fn aggregate(root: &Node) -> Stats {
    let mut stats = Stats::new();
    for child in &root.children {
        visit(child, "", &mut stats);
    }
    stats
}

fn visit(node: &Node, parent: &str, stats: &mut Stats) {
    let path = if parent.is_empty() {
        node.name.to_string()
    } else {
        format!("{parent}/{}", node.name)
    };

    match node.kind {
        NodeKind::File => stats.record_file(path, node),
        NodeKind::Symlink => stats.record_symlink(node.depth),
        NodeKind::Directory => {
            stats.record_dir(node.depth);
            for child in &node.children {
                visit(child, &path, stats);
            }
        }
    }
}

impl From<&Node> for Stats {
    fn from(root: &Node) -> Self {
        aggregate(root)
    }
}
