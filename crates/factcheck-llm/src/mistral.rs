//! Mistral Provider Implementation
//!
//! Integration with Mistral's chat-completions API.
//!
//! # Features
//!
//! - Async HTTP communication with bearer-token auth
//! - JSON response mode for structured requests
//! - Retry logic with exponential backoff on rate limits and transport errors
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use factcheck_llm::MistralProvider;
//!
//! let provider = MistralProvider::new("my-api-key", "mistral-small-latest")
//!     .expect("client builds")
//!     .with_max_retries(5);
//! ```

use crate::LlmError;
use async_trait::async_trait;
use factcheck_domain::traits::{CompletionRequest, LlmProvider, ResponseShape};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Mistral API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai";

/// Default chat model
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Connection settings for [`MistralProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistralConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Mistral API provider
pub struct MistralProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl MistralProvider {
    /// Create a new Mistral provider against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::build(
            DEFAULT_ENDPOINT.to_string(),
            model.into(),
            api_key.into(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_RETRIES,
        )
    }

    /// Create a provider from connection settings
    pub fn from_config(config: &MistralConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::build(
            config.endpoint.clone(),
            config.model.clone(),
            api_key.into(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )
    }

    fn build(
        endpoint: String,
        model: String,
        api_key: String,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// Override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request, retrying transient failures
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected
    /// - The model is not available
    /// - Network communication keeps failing after all retries
    /// - The response has no message content
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send_once(request).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() => {
                    warn!("Mistral request attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Communication("Max retries exceeded".to_string())
        }))
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            response_format: match request.response_shape {
                ResponseShape::Structured => Some(ResponseFormat { kind: "json_object" }),
                ResponseShape::Text => None,
            },
        };

        debug!("POST {} (model {}, {} prompt chars)", url, self.model, request.prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let chat: ChatResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

            return chat
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| LlmError::InvalidResponse("Response contained no message".to_string()));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                LlmError::Unauthorized(error_text)
            }
            reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
            reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            s if s.is_server_error() => {
                LlmError::Communication(format!("HTTP {}: {}", s, error_text))
            }
            s => LlmError::Other(format!("HTTP {}: {}", s, error_text)),
        })
    }
}

#[async_trait]
impl LlmProvider for MistralProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mistral_provider_creation() {
        let provider = MistralProvider::new("key", "mistral-small-latest").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), "mistral-small-latest");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_mistral_provider_from_config() {
        let config = MistralConfig {
            endpoint: "http://localhost:8089/".to_string(),
            model: "open-mistral-nemo".to_string(),
            timeout_secs: 5,
            max_retries: 0,
        };
        let provider = MistralProvider::from_config(&config, "key").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8089");
        assert_eq!(provider.model(), "open-mistral-nemo");
        // At least one attempt is always made
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: MistralConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MistralConfig::default());
    }

    #[test]
    fn test_structured_request_body() {
        let body = ChatRequest {
            model: "m",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            temperature: 0.25,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["temperature"], 0.25);
    }

    #[test]
    fn test_text_request_omits_response_format() {
        let body = ChatRequest {
            model: "m",
            messages: vec![],
            temperature: 0.5,
            response_format: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[tokio::test]
    async fn test_mistral_error_handling() {
        // Invalid endpoint triggers a transport error
        let provider = MistralProvider::new("key", "m")
            .unwrap()
            .with_endpoint("http://localhost:99999")
            .with_max_retries(1);

        let result = provider.complete(&CompletionRequest::structured("test", 0.1)).await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration test (requires MISTRAL_API_KEY)
    #[tokio::test]
    #[ignore]
    async fn test_mistral_generate_integration() {
        let Ok(key) = std::env::var("MISTRAL_API_KEY") else {
            return;
        };
        let provider = MistralProvider::new(key, DEFAULT_MODEL).unwrap();
        let request = CompletionRequest::structured(r#"Return {"ok": true} as JSON."#, 0.0);
        let response = provider.complete(&request).await.unwrap();
        assert!(response.contains("ok"));
    }
}
