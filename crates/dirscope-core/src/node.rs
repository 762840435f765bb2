//! File and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Type of file system node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link. Never followed, always a leaf.
    Symlink,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, NodeKind::Symlink)
    }
}

/// A single entry in the scanned tree.
///
/// `size` is only meaningful for files. Directories always carry `0`; use
/// [`Node::total_file_size`] for the recursive total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Node type.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Size in bytes (files only).
    pub size: u64,

    /// Link target, for symlinks whose target could be read.
    #[serde(default, rename = "target", skip_serializing_if = "Option::is_none")]
    pub link_target: Option<CompactString>,

    /// Set when the depth limit stopped this directory from being listed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,

    /// Distance from the scan root (root = 0). Derived from position.
    #[serde(skip)]
    pub depth: u32,

    /// Children nodes (directories only), sorted by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(name: impl Into<CompactString>, size: u64, depth: u32) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            size,
            link_target: None,
            truncated: false,
            depth,
            children: Vec::new(),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(name: impl Into<CompactString>, depth: u32) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            size: 0,
            link_target: None,
            truncated: false,
            depth,
            children: Vec::new(),
        }
    }

    /// Create a new symlink leaf.
    pub fn new_symlink(
        name: impl Into<CompactString>,
        target: Option<CompactString>,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Symlink,
            size: 0,
            link_target: target,
            truncated: false,
            depth,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is a symlink.
    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Add a child, fixing up its depth relative to this node.
    pub fn push_child(&mut self, mut child: Node) {
        child.assign_depths(self.depth + 1);
        self.children.push(child);
    }

    /// Sort children by name (byte-wise, case-sensitive), recursively.
    pub fn sort_children_by_name(&mut self) {
        self.children.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        for child in &mut self.children {
            child.sort_children_by_name();
        }
    }

    /// Set this node's depth and recompute all descendant depths.
    pub fn assign_depths(&mut self, depth: u32) {
        self.depth = depth;
        for child in &mut self.children {
            child.assign_depths(depth + 1);
        }
    }

    /// Sum of all descendant file sizes, computed on demand.
    ///
    /// For a file this is its own size.
    pub fn total_file_size(&self) -> u64 {
        match self.kind {
            NodeKind::File => self.size,
            NodeKind::Symlink => 0,
            NodeKind::Directory => self.children.iter().map(Node::total_file_size).sum(),
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Lower-cased extension of the node name, if it has one.
    ///
    /// The suffix after the last `.` counts, except when that dot is the
    /// first character (`.bashrc`) or the last one (`archive.`).
    pub fn extension(&self) -> Option<String> {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                Some(ext.to_lowercase())
            }
            _ => None,
        }
    }
}
