//! Scan result container.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScanWarning;
use crate::node::Node;
use crate::stats::{Stats, aggregate};

/// A built tree together with the warnings collected while building it.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Root node of the tree.
    pub root: Node,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutcome {
    /// Create a new scan outcome.
    pub fn new(
        root: Node,
        root_path: PathBuf,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scan_duration,
            warnings,
        }
    }

    /// Compute statistics for the scanned tree.
    pub fn stats(&self) -> Stats {
        aggregate(&self.root)
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
