//! HTTP client for the chat-completion endpoint.

use crate::config::AiConfig;
use crate::error::AiError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Sends structure prompts to the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: AiConfig,
    http: reqwest::Client,
}

impl AnalysisClient {
    /// Create a client. Fails when no API key is configured.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        if !config.has_api_key() {
            return Err(AiError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(AiError::Client)?;

        Ok(Self { config, http })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Build the request body for a prompt.
    pub fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
            temperature: self.config.temperature,
            stream: false,
        }
    }

    /// Send a prompt and return the first choice's text unchanged.
    pub async fn analyze(&self, prompt: &str) -> Result<String, AiError> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.send(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Analysis request exceeded {}s", timeout.as_secs());
                Err(AiError::Timeout(timeout))
            }
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, AiError> {
        let request = self.request_for(prompt);
        tracing::debug!(
            url = %self.config.api_url,
            model = %request.model,
            prompt_chars = prompt.chars().count(),
            "Sending analysis request"
        );

        let mut builder = self.http.post(&self.config.api_url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Analysis service rejected request");
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        extract_answer(&body)
    }

    fn request_error(&self, error: reqwest::Error) -> AiError {
        if error.is_timeout() {
            AiError::Timeout(self.config.timeout())
        } else {
            AiError::Request(error)
        }
    }
}

/// Pull the first choice's message content out of a response body.
pub fn extract_answer(body: &str) -> Result<String, AiError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(AiError::MalformedResponse)?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(AiError::NoChoices)?;

    if choice.message.content.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(choice.message.content)
}
