//! Analysis service configuration.

use std::fmt;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Default chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that analyzes file and directory \
structures. From the structure you are given, work out the type of project, describe \
its organization, and answer the user's question.";

/// Environment variables read by [`AiConfig::from_lookup`].
pub mod env {
    pub const API_KEY: &str = "DEEPSEEK_API_KEY";
    pub const API_KEY_FALLBACK: &str = "DIRSCOPE_API_KEY";
    pub const API_URL: &str = "DIRSCOPE_API_URL";
    pub const MODEL: &str = "DIRSCOPE_MODEL";
    pub const TIMEOUT_SECS: &str = "DIRSCOPE_TIMEOUT_SECS";
}

/// Settings for the analysis client.
#[derive(Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct AiConfig {
    /// Chat-completion endpoint URL.
    #[builder(default = "DEFAULT_API_URL.to_string()")]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model name sent with each request.
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token. Never serialized.
    #[builder(default)]
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Sampling temperature.
    #[builder(default = "DEFAULT_TEMPERATURE")]
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Whole-request timeout in seconds.
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System instruction.
    #[builder(default = "SYSTEM_PROMPT.to_string()")]
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_system_prompt() -> String {
    SYSTEM_PROMPT.to_string()
}

impl AiConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.api_url.as_ref().is_some_and(|url| url.trim().is_empty()) {
            return Err("API URL cannot be empty".to_string());
        }
        if self.timeout_secs == Some(0) {
            return Err("Timeout must be at least one second".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("Temperature {t} is outside 0.0..=2.0"));
            }
        }
        Ok(())
    }
}

impl AiConfig {
    /// Create a new config builder.
    pub fn builder() -> AiConfigBuilder {
        AiConfigBuilder::default()
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AiError> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut builder = Self::builder();
        builder.api_key(read(env::API_KEY).or_else(|| read(env::API_KEY_FALLBACK)));
        if let Some(url) = read(env::API_URL) {
            builder.api_url(url);
        }
        if let Some(model) = read(env::MODEL) {
            builder.model(model);
        }
        if let Some(raw) = read(env::TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                AiError::Config(format!(
                    "{} must be a whole number of seconds, got {raw:?}",
                    env::TIMEOUT_SECS
                ))
            })?;
            builder.timeout_secs(secs);
        }

        builder.build().map_err(|e| AiError::Config(e.to_string()))
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a non-empty API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            system_prompt: default_system_prompt(),
        }
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_environment_overrides() {
        let config = AiConfig::from_lookup(lookup_from(&[
            (env::API_KEY, "sk-test"),
            (env::API_URL, "http://localhost:9000/v1/chat/completions"),
            (env::MODEL, "local-model"),
            (env::TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_url, "http://localhost:9000/v1/chat/completions");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_fallback_key_and_blank_values() {
        let config = AiConfig::from_lookup(lookup_from(&[
            (env::API_KEY, "   "),
            (env::API_KEY_FALLBACK, "sk-fallback"),
            (env::MODEL, ""),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-fallback"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_timeout() {
        let result = AiConfig::from_lookup(lookup_from(&[(env::TIMEOUT_SECS, "soon")]));
        assert!(matches!(result, Err(AiError::Config(_))));

        let result = AiConfig::from_lookup(lookup_from(&[(env::TIMEOUT_SECS, "0")]));
        assert!(matches!(result, Err(AiError::Config(_))));
    }

    #[test]
    fn test_builder_validation() {
        assert!(AiConfig::builder().temperature(3.5f32).build().is_err());
        assert!(AiConfig::builder().api_url("").build().is_err());
        assert!(AiConfig::builder().build().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig::builder()
            .api_key(Some("sk-secret".to_string()))
            .build()
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_key_is_not_serialized() {
        let config = AiConfig::builder()
            .api_key(Some("sk-secret".to_string()))
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
