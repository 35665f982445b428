//! Anthropic messages API client.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::http;
use crate::{AiClient, AiError, Message, Role};

pub const API_BASE: &str = "https://api.anthropic.com/v1";
pub const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
const MAX_TOKENS: u32 = 1024;

pub struct AnthropicClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AiError> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE.to_string(),
            http: http::build_client()?,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn auth_headers(&self) -> Result<reqwest::header::HeaderMap, AiError> {
        http::headers(&[
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", API_VERSION),
        ])
    }
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl AiClient for AnthropicClient {
    async fn send_message(&self, history: &[Message]) -> Result<String, AiError> {
        let body = build_request_body(&self.model, history);
        let url = format!("{}/messages", self.base_url);
        let response = http::post_json(&self.http, &url, self.auth_headers()?, &body).await?;
        let reply = parse_response(&response)?;
        debug!(model = %self.model, chars = reply.len(), "anthropic reply");
        Ok(reply)
    }

    async fn list_models(&self) -> Result<Vec<String>, AiError> {
        let url = format!("{}/models", self.base_url);
        let response = http::get_json(&self.http, &url, self.auth_headers()?).await?;
        let models = filter_models(crate::openai::model_ids(&response));
        info!(count = models.len(), "anthropic models listed");
        Ok(models)
    }
}

pub fn build_request_body(model: &str, history: &[Message]) -> Value {
    json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "messages": normalize_messages(history),
    })
}

/// Fold the history into alternating turns.
///
/// Only user and assistant messages are sent. Consecutive messages with the
/// same role become one turn with several text parts. An empty history
/// becomes a single "Hello" from the user.
pub fn normalize_messages(history: &[Message]) -> Vec<Value> {
    let mut turns: Vec<(&'static str, Vec<Value>)> = Vec::new();
    for message in history {
        let role = match message.role {
            Role::Assistant => "assistant",
            Role::User => "user",
            Role::System => continue,
        };
        let part = json!({ "type": "text", "text": message.content });
        match turns.last_mut() {
            Some((last, parts)) if *last == role => parts.push(part),
            _ => turns.push((role, vec![part])),
        }
    }
    if turns.is_empty() {
        turns.push(("user", vec![json!({ "type": "text", "text": "Hello" })]));
    }
    turns
        .into_iter()
        .map(|(role, content)| json!({ "role": role, "content": content }))
        .collect()
}

/// Joined text blocks of the reply, trimmed.
pub fn parse_response(response: &Value) -> Result<String, AiError> {
    let text: String = response["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(AiError::ApiError("Anthropic returned no content.".into()));
    }
    Ok(text.to_string())
}

pub fn filter_models(ids: Vec<String>) -> Vec<String> {
    let mut ids: Vec<String> = ids
        .into_iter()
        .filter(|id| id.to_ascii_lowercase().contains("claude"))
        .collect();
    ids.sort();
    ids
}
