//! OpenRouter model adapter.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint (OpenRouter,
//! LiteLLM, or a self-hosted gateway), which is how every provider is
//! reached in practice. Credentials are checked at construction so a
//! misconfigured roster fails before the first debate phase runs.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{DebateModel, Message, ModelConfig, ModelResponse};
use crate::error::ModelError;

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default API base when none is configured.
const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Model adapter backed by an OpenAI-compatible chat-completions API.
pub struct OpenRouterModel {
    config: ModelConfig,
    api_base: String,
    api_key: String,
    http_client: Client,
}

impl OpenRouterModel {
    /// Create an adapter with an explicit API key and base URL.
    pub fn new(config: ModelConfig, api_key: String, api_base: String) -> Self {
        Self {
            config,
            api_base,
            api_key,
            http_client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create an adapter with an explicit API key, reading the base URL
    /// from `OPENROUTER_API_BASE` when set.
    pub fn with_key(config: ModelConfig, api_key: String) -> Self {
        let api_base =
            env::var("OPENROUTER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(config, api_key, api_base)
    }

    /// Create an adapter reading credentials from the environment.
    ///
    /// Reads `OPENROUTER_API_KEY` (required) and `OPENROUTER_API_BASE`
    /// (optional, defaults to the public OpenRouter endpoint).
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MissingApiKey` if the key is not set.
    pub fn from_env(config: ModelConfig) -> Result<Self, ModelError> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| ModelError::MissingApiKey {
            var: API_KEY_ENV.to_string(),
        })?;
        Ok(Self::with_key(config, api_key))
    }

    /// The API base URL this adapter targets.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

/// Response body from the chat-completions endpoint.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error envelope from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl DebateModel for OpenRouterModel {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn provider(&self) -> &str {
        &self.config.provider
    }

    async fn generate(
        &self,
        system_prompt: &str,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<ModelResponse, ModelError> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        api_messages.push(ApiMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        for msg in messages {
            api_messages.push(ApiMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            });
        }

        let api_request = ApiRequest {
            model: self.config.model_id.clone(),
            messages: api_messages,
            temperature: self.config.temperature,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.api_base);

        let http_response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        let status = http_response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                if status_code == 429 {
                    return Err(ModelError::RateLimited(error_response.error.message));
                }
                return Err(ModelError::ApiError {
                    code: status_code,
                    message: error_response.error.message,
                });
            }

            return Err(ModelError::ApiError {
                code: status_code,
                message: error_text,
            });
        }

        let api_response: ApiResponse = http_response
            .json()
            .await
            .map_err(|e| ModelError::ParseError(format!("Failed to parse API response: {}", e)))?;

        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| ModelError::EmptyResponse(self.config.name.clone()))?;

        let (input_tokens, output_tokens) = api_response
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(ModelResponse {
            content,
            model: api_response.model,
            input_tokens,
            output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ModelConfig {
        ModelConfig::new("Anthropic", "anthropic/claude-opus-4.5", "Claude Opus 4.5")
    }

    #[test]
    fn test_adapter_exposes_identity() {
        let model = OpenRouterModel::new(
            test_config(),
            "test-key".to_string(),
            DEFAULT_API_BASE.to_string(),
        );

        assert_eq!(model.name(), "Claude Opus 4.5");
        assert_eq!(model.model_id(), "anthropic/claude-opus-4.5");
        assert_eq!(model.provider(), "Anthropic");
        assert_eq!(model.api_base(), DEFAULT_API_BASE);
    }

    #[tokio::test]
    async fn test_generate_connection_error() {
        // Port 65535 is unlikely to have a listener.
        let model = OpenRouterModel::new(
            test_config(),
            "test-key".to_string(),
            "http://localhost:65535".to_string(),
        );

        let result = model
            .generate("You are a debater.", &[Message::user("speak")], 100)
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ModelError::RequestFailed(_)));
    }

    #[test]
    fn test_api_request_serialization() {
        let request = ApiRequest {
            model: "anthropic/claude-opus-4.5".to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: "test".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 1600,
        };

        let json = serde_json::to_string(&request).expect("serialization should succeed");
        assert!(json.contains("\"model\":\"anthropic/claude-opus-4.5\""));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(json.contains("\"max_tokens\":1600"));
    }
}
