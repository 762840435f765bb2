//! Error types for rendering and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while serializing or persisting a structure document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document could not be encoded as JSON.
    #[error("Failed to serialize structure: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The JSON input did not describe a structure document.
    #[error("Failed to parse structure: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document could not be written to disk.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
