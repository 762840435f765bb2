//! Directory tree builder for dirscope.
//!
//! `dirscope-scan` walks a root directory and produces the [`Node`] tree
//! consumed by the statistics aggregator and the renderers. Key features:
//!
//! - **Deterministic** byte-wise sorted traversal via jwalk (serial mode)
//! - **Exclusion** by glob pattern, applied before a subtree is read
//! - **Depth limits** with explicitly `truncated` directory nodes
//! - **Non-fatal warnings** for unreadable entries, returned with the tree
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscope_scan::{ScanConfig, TreeBuilder};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let outcome = TreeBuilder::new().build(&config).unwrap();
//! let stats = outcome.stats();
//!
//! println!("Total size: {} bytes", stats.total_size);
//! println!("Warnings: {}", outcome.warnings.len());
//! ```

mod scanner;

pub use scanner::TreeBuilder;

// Re-export core types for convenience
pub use dirscope_core::{
    Node, NodeKind, ScanConfig, ScanError, ScanOutcome, ScanWarning, Stats, WarningKind,
};
