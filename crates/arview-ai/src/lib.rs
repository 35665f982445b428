//! AI chat assistant backends.
//!
//! Provides OpenAI and Anthropic clients behind one [`AiClient`] trait, a
//! chat session with capped history, and the persisted chat settings.

pub mod anthropic;
mod http;
pub mod openai;
pub mod provider;
pub mod session;
pub mod settings;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use provider::{client_for, list_models, EchoClient, Provider};
pub use session::{ChatSession, MAX_HISTORY};
pub use settings::ChatSettings;

#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send the conversation and return the assistant's reply text.
    async fn send_message(&self, history: &[Message]) -> Result<String, AiError>;

    /// Chat model ids offered by the provider, filtered and sorted.
    async fn list_models(&self) -> Result<Vec<String>, AiError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("No API key set for {0}. Open Settings and add one.")]
    MissingKey(String),
    #[error("Chat is busy with another request")]
    Busy,
    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<AiError> for arview_common::ArviewError {
    fn from(e: AiError) -> Self {
        arview_common::ArviewError::Ai(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(Role::System.as_str(), "system");
    }

    #[test]
    fn missing_key_message_is_ui_ready() {
        assert_eq!(
            AiError::MissingKey("openai".into()).to_string(),
            "No API key set for openai. Open Settings and add one."
        );
    }

    #[test]
    fn converts_to_app_error() {
        let err: arview_common::ArviewError = AiError::RateLimited.into();
        assert_eq!(err.to_string(), "ai error: Rate limited");
    }
}
