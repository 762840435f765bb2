//! Structured (JSON) serialization of a scanned tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dirscope_core::{Node, ScanOutcome, Stats};

use crate::error::RenderError;

/// A scanned tree in its persisted form.
///
/// The root node's fields sit at the top level of the JSON object, next to
/// the optional `path` and `stats` keys:
///
/// ```json
/// {
///   "path": "/tmp/x",
///   "name": "x",
///   "type": "directory",
///   "size": 0,
///   "children": [{ "name": "a.txt", "type": "file", "size": 10 }],
///   "stats": { "total_files": 1, "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDocument {
    /// Canonical path that was scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Root of the tree.
    #[serde(flatten)]
    pub root: Node,

    /// Statistics, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

impl StructureDocument {
    /// Wrap a tree without path or statistics.
    pub fn new(root: Node) -> Self {
        Self {
            path: None,
            root,
            stats: None,
        }
    }

    /// Build a document from a scan, embedding statistics if given.
    pub fn from_outcome(outcome: &ScanOutcome, stats: Option<Stats>) -> Self {
        Self {
            path: Some(outcome.root_path.clone()),
            root: outcome.root.clone(),
            stats,
        }
    }

    /// Attach the scanned path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach statistics.
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, RenderError> {
        serde_json::to_string_pretty(self).map_err(RenderError::Serialize)
    }

    /// Decode from JSON, recomputing node depths.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let mut document: Self = serde_json::from_str(json).map_err(RenderError::Parse)?;
        document.root.assign_depths(0);
        Ok(document)
    }

    /// Write the document as pretty-printed JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), RenderError> {
        let write_err = |source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(RenderError::Serialize)?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        tracing::debug!(path = %path.display(), "structure written");
        Ok(())
    }
}
