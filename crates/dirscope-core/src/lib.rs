//! Core types for dirscope.
//!
//! This crate provides the data structures shared by the scanner, the
//! renderers and the CLI: the [`Node`] tree, [`ScanConfig`], scan errors and
//! warnings, and the [`Stats`] aggregator.

mod config;
mod error;
mod node;
mod stats;
mod tree;

pub use config::{ExcludeMatcher, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{Node, NodeKind};
pub use stats::{NO_EXTENSION, Stats, aggregate};
pub use tree::ScanOutcome;
