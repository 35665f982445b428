//! Provider selection from chat settings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::anthropic::{self, AnthropicClient};
use crate::openai::{self, OpenAiClient};
use crate::settings::ChatSettings;
use crate::{AiClient, AiError, Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => openai::DEFAULT_MODEL,
            Self::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }

    /// A client for this provider with `api_key`.
    pub fn client(self, api_key: &str, model: &str) -> Result<Box<dyn AiClient>, AiError> {
        let model = if model.trim().is_empty() {
            self.default_model()
        } else {
            model
        };
        let client: Box<dyn AiClient> = match self {
            Self::OpenAi => Box::new(OpenAiClient::new(api_key, model)?),
            Self::Anthropic => Box::new(AnthropicClient::new(api_key, model)?),
        };
        Ok(client)
    }
}

/// Client for the configured provider.
///
/// Unknown providers get an [`EchoClient`]. Known providers without a key
/// fail with [`AiError::MissingKey`].
pub fn client_for(settings: &ChatSettings) -> Result<Box<dyn AiClient>, AiError> {
    let Some(provider) = Provider::from_name(&settings.provider) else {
        return Ok(Box::new(EchoClient));
    };
    let key = settings
        .api_key()
        .ok_or_else(|| AiError::MissingKey(provider.as_str().to_string()))?;
    provider.client(key, &settings.model)
}

/// Model listing for the settings form, which supplies its own key.
pub async fn list_models(provider: Provider, api_key: &str) -> Result<Vec<String>, AiError> {
    if api_key.trim().is_empty() {
        return Err(AiError::ApiError("No API key set. Enter your key first.".into()));
    }
    provider
        .client(api_key.trim(), provider.default_model())?
        .list_models()
        .await
}

/// Repeats the last user message back. Used when no real provider is
/// configured.
pub struct EchoClient;

#[async_trait]
impl AiClient for EchoClient {
    async fn send_message(&self, history: &[Message]) -> Result<String, AiError> {
        let text = history
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(format!("You said: {text}"))
    }

    async fn list_models(&self) -> Result<Vec<String>, AiError> {
        Ok(Vec::new())
    }
}
