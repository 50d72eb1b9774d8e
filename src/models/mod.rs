//! Model adapters for the debate engine.
//!
//! Every text-generation backend plugs in through the [`DebateModel`]
//! trait: a stable display name, a model identifier, a provider label,
//! and a single `generate` operation. The engine, judge panel, and
//! matrix runner only ever see `Arc<dyn DebateModel>`.

pub mod openrouter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub use openrouter::OpenRouterModel;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire-format string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender.
    pub role: Role,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Response from a model generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Generated text content.
    pub content: String,
    /// Model identifier that produced the response.
    pub model: String,
    /// Tokens consumed by the prompt.
    pub input_tokens: u32,
    /// Tokens generated.
    pub output_tokens: u32,
}

impl ModelResponse {
    /// Total tokens used in the request.
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Configuration for instantiating a model adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider label (e.g., "Anthropic", "OpenAI").
    pub provider: String,
    /// API model identifier (e.g., "anthropic/claude-opus-4.5").
    pub model_id: String,
    /// Human-readable display name (e.g., "Claude Opus 4.5").
    pub name: String,
    /// Sampling temperature.
    pub temperature: f64,
}

impl ModelConfig {
    /// Create a config with the default temperature.
    pub fn new(
        provider: impl Into<String>,
        model_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model_id: model_id.into(),
            name: name.into(),
            temperature: 0.7,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }
}

/// Trait for model backends used in debates.
///
/// Implementations must be constructible only with valid credentials:
/// a missing API key is a configuration error surfaced before any
/// debate starts, never mid-phase.
#[async_trait]
pub trait DebateModel: Send + Sync {
    /// Human-readable name for this model (e.g., "Claude Opus 4.5").
    fn name(&self) -> &str;

    /// API model identifier (e.g., "anthropic/claude-opus-4.5").
    fn model_id(&self) -> &str;

    /// Provider label (e.g., "Anthropic").
    fn provider(&self) -> &str;

    /// Generate a response from the model.
    ///
    /// `max_tokens` is a hard ceiling on generated output. Token counts
    /// in the response are as reported by the backend.
    async fn generate(
        &self,
        system_prompt: &str,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<ModelResponse, ModelError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let system = Message::system("You are a debater.");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "You are a debater.");

        let user = Message::user("Hello");
        assert_eq!(user.role, Role::User);

        let assistant = Message::assistant("Hi there!");
        assert_eq!(assistant.role, Role::Assistant);
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_model_response_total_tokens() {
        let response = ModelResponse {
            content: "text".to_string(),
            model: "test-model".to_string(),
            input_tokens: 120,
            output_tokens: 80,
        };
        assert_eq!(response.total_tokens(), 200);
    }

    #[test]
    fn test_model_config_builder() {
        let config = ModelConfig::new("Anthropic", "anthropic/claude-opus-4.5", "Claude Opus 4.5")
            .with_temperature(0.3);
        assert_eq!(config.provider, "Anthropic");
        assert_eq!(config.model_id, "anthropic/claude-opus-4.5");
        assert_eq!(config.name, "Claude Opus 4.5");
        assert!((config.temperature - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_temperature_clamped() {
        let config = ModelConfig::new("X", "x/y", "Y").with_temperature(5.0);
        assert!((config.temperature - 2.0).abs() < f64::EPSILON);
    }
}
