//! Structure analysis through an OpenAI-compatible chat-completion service.
//!
//! The client is a collaborator of the dirscope CLI: it receives a prompt
//! built from a structure document and returns the service's answer. Every
//! failure is reported as an [`AiError`] and never touches the other outputs.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{AnalysisClient, extract_answer};
pub use config::{AiConfig, AiConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL, SYSTEM_PROMPT};
pub use error::AiError;
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
