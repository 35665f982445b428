//! OpenAI chat completions client.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::http;
use crate::{AiClient, AiError, Message};

pub const API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
const TEMPERATURE: f64 = 0.7;

static CHAT_MODEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(gpt-|o1|o3)").unwrap());
static NON_CHAT_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)embedding|whisper|tts|audio|vision").unwrap());

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiClient {
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
        let bearer = format!("Bearer {}", self.api_key);
        http::headers(&[("authorization", bearer.as_str())])
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(&self, history: &[Message]) -> Result<String, AiError> {
        let body = build_request_body(&self.model, history);
        let url = format!("{}/chat/completions", self.base_url);
        let response = http::post_json(&self.http, &url, self.auth_headers()?, &body).await?;
        let reply = parse_response(&response)?;
        debug!(model = %self.model, chars = reply.len(), "openai reply");
        Ok(reply)
    }

    async fn list_models(&self) -> Result<Vec<String>, AiError> {
        let url = format!("{}/models", self.base_url);
        let response = http::get_json(&self.http, &url, self.auth_headers()?).await?;
        let models = filter_models(model_ids(&response));
        info!(count = models.len(), "openai models listed");
        Ok(models)
    }
}

/// Chat completion request: system prompt first, then the history.
pub fn build_request_body(model: &str, history: &[Message]) -> Value {
    let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];
    messages.extend(
        history
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content })),
    );
    json!({
        "model": model,
        "messages": messages,
        "temperature": TEMPERATURE,
    })
}

pub fn parse_response(response: &Value) -> Result<String, AiError> {
    let choice = response["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .ok_or_else(|| AiError::ApiError("OpenAI returned no choices.".into()))?;
    Ok(choice["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}

pub(crate) fn model_ids(response: &Value) -> Vec<String> {
    response["data"]
        .as_array()
        .map(|data| {
            data.iter()
                .filter_map(|m| m["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Keep chat-capable models, sorted.
pub fn filter_models(ids: Vec<String>) -> Vec<String> {
    let mut ids: Vec<String> = ids
        .into_iter()
        .filter(|id| CHAT_MODEL.is_match(id) && !NON_CHAT_MODEL.is_match(id))
        .collect();
    ids.sort();
    ids
}
