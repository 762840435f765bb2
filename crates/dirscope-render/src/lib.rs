//! Renderers for dirscope.
//!
//! Every renderer is a pure transform over a [`Node`] tree or its [`Stats`]:
//!
//! - [`render_tree`] / [`render_tree_with_sizes`] - indented tree text
//! - [`render_stats`] - statistics report
//! - [`StructureDocument`] - JSON form, used for persistence and as the
//!   source of the analysis prompt
//! - [`PromptBuilder`] - depth- and size-bounded outline plus instructions
//!
//! ```rust
//! use dirscope_core::Node;
//! use dirscope_render::{format_size, render_tree};
//!
//! let mut root = Node::new_directory("project", 0);
//! root.push_child(Node::new_file("README.md", 2048, 0));
//!
//! assert_eq!(render_tree(&root), "project/\n└── README.md\n");
//! assert_eq!(format_size(0), "0 B");
//! ```
//!
//! [`Node`]: dirscope_core::Node
//! [`Stats`]: dirscope_core::Stats

mod document;
mod error;
mod format;
mod prompt;
mod summary;
mod text;

pub use document::StructureDocument;
pub use error::RenderError;
pub use format::format_size;
pub use prompt::{
    ANALYSIS_PREAMBLE, DEFAULT_MAX_CHARS, DEFAULT_PROMPT_DEPTH, DEFAULT_QUESTION, PromptBuilder,
};
pub use summary::{TOP_EXTENSIONS, render_stats};
pub use text::{SizeOptions, TRUNCATED_MARKER, render_tree, render_tree_with_sizes};
