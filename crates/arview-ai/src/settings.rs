//! Persisted chat settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::AiError;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettings {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub theme: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: crate::openai::DEFAULT_MODEL.into(),
            api_key: None,
            theme: "dark".into(),
        }
    }
}

impl std::fmt::Debug for ChatSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSettings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("theme", &self.theme)
            .finish()
    }
}

impl ChatSettings {
    /// The key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// What the chat page may see: everything but the key.
    pub fn public_view(&self) -> Value {
        json!({
            "provider": self.provider,
            "model": self.model,
            "theme": self.theme,
            "hasKey": self.api_key().is_some(),
        })
    }

    /// Apply the recognised fields of a JSON object. A `null` or empty
    /// `apiKey` clears the key.
    pub fn merge(&mut self, updates: &Value) {
        let Some(map) = updates.as_object() else {
            return;
        };
        for (field, value) in map {
            match (field.as_str(), value) {
                ("provider", Value::String(s)) => self.provider = s.trim().to_ascii_lowercase(),
                ("model", Value::String(s)) => self.model = s.trim().to_string(),
                ("theme", Value::String(s)) => self.theme = s.clone(),
                ("apiKey", Value::String(s)) if !s.trim().is_empty() => {
                    self.api_key = Some(s.trim().to_string())
                }
                ("apiKey", Value::String(_) | Value::Null) => self.api_key = None,
                _ => debug!(field, "ignoring chat setting"),
            }
        }
    }

    /// Read settings from `path`. Missing or unreadable files give defaults.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "failed to read chat settings: {e}");
                return Self::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), "invalid chat settings: {e}");
            Self::default()
        })
    }

    /// Write settings to `path` through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), AiError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AiError::Settings(e.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| AiError::Settings(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| AiError::Settings(e.to_string()))?;
        std::fs::rename(&tmp, path).map_err(|e| AiError::Settings(e.to_string()))?;
        debug!(path = %path.display(), "chat settings saved");
        Ok(())
    }
}
