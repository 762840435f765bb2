//! Error types for the analysis client.

use std::time::Duration;

use thiserror::Error;

/// Failures of the analysis step. None of them affect other outputs.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured.
    #[error("No API key configured (set DEEPSEEK_API_KEY or add it to a .env file)")]
    MissingApiKey,

    /// A configuration value could not be used.
    #[error("Invalid analysis configuration: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response body not read.
    #[error("Request to analysis service failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The service did not answer in time.
    #[error("Analysis service did not answer within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("Analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a chat completion.
    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The response contained no choices.
    #[error("Analysis service returned no choices")]
    NoChoices,

    /// The first choice had no content.
    #[error("Analysis service returned an empty message")]
    EmptyResponse,
}
