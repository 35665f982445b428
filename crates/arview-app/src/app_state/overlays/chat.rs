//! AI chat overlay: provider requests, settings and panel placement.

use std::sync::Arc;

use arview_ai::{client_for, list_models, Provider};
use arview_common::Rect;
use arview_tabs::layout::{self, PinMode};
use arview_webview::ViewId;
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;
use crate::app_state::types::AppCommand;

use super::CHAT;

fn pin_payload(mode: PinMode) -> Value {
    json!({ "mode": mode, "draggable": mode != PinMode::Fixed })
}

fn rect_from(payload: &Value) -> Option<Rect> {
    let num = |name: &str| payload.get(name).and_then(Value::as_f64);
    let rect = Rect::new(num("x")?, num("y")?, num("width")?, num("height")?);
    (rect.width > 0.0 && rect.height > 0.0).then_some(rect)
}

impl ArviewApp {
    fn send_chat(&mut self, kind: &str, payload: Value) {
        self.send_ipc(ViewId::Overlay(CHAT), kind, payload);
    }

    /// History, public settings and pin mode for a freshly shown panel.
    pub(super) fn send_chat_state(&mut self) {
        let payload = json!({
            "messages": self.chat.history(),
            "config": self.chat_settings.public_view(),
            "pin": pin_payload(self.overlays.chat_pin),
        });
        self.send_chat("chat-history", payload);
    }

    fn runtime_handle(&self) -> Option<tokio::runtime::Handle> {
        self.tokio_runtime.as_ref().map(|rt| rt.handle().clone())
    }

    pub(super) fn handle_chat_message(&mut self, kind: &str, payload: &Value) {
        match kind {
            "chat-toggle" => self.toggle_overlay(CHAT),
            "chat-hide" => self.hide_overlay(CHAT),
            "chat-send" => {
                let text = payload.get("text").and_then(Value::as_str).unwrap_or("");
                self.send_chat_message(text.to_string());
            }
            "chat-clear" => {
                self.chat.clear();
                self.send_chat("chat-cleared", Value::Null);
            }
            "chat-get-config" => {
                let config = self.chat_settings.public_view();
                self.send_chat("chat-config-update", config);
            }
            "chat-save-config" => self.save_chat_settings(payload),
            "chat-list-models" => self.request_model_list(payload),
            "chat-pin" => {
                let mode = payload
                    .get("mode")
                    .cloned()
                    .and_then(|m| serde_json::from_value::<PinMode>(m).ok());
                match mode {
                    Some(mode) => self.set_chat_pin(mode),
                    None => tracing::warn!(?payload, "invalid chat pin mode"),
                }
            }
            "chat-move" => {
                let Some(rect) = rect_from(payload) else {
                    return;
                };
                self.move_chat(rect);
            }
            _ => tracing::warn!(kind, "unhandled chat message"),
        }
    }

    fn send_chat_message(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        if self.chat.is_busy() {
            self.send_chat("chat-error", json!({ "error": "Chat is busy with another request" }));
            return;
        }
        let client = match client_for(&self.chat_settings) {
            Ok(client) => client,
            Err(e) => {
                self.send_chat("chat-error", json!({ "error": e.to_string() }));
                return;
            }
        };
        let Some(handle) = self.runtime_handle() else {
            self.send_chat("chat-error", json!({ "error": "Chat is not available yet" }));
            return;
        };

        let session = Arc::clone(&self.chat);
        let tx = self.cmd_tx.clone();
        handle.spawn(async move {
            let result = session
                .send(client.as_ref(), &text)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppCommand::ChatReply(result));
        });
    }

    pub(in crate::app_state) fn handle_chat_reply(&mut self, result: Result<String, String>) {
        match result {
            Ok(text) => self.send_chat("chat-reply", json!({ "role": "assistant", "text": text })),
            Err(error) => self.send_chat("chat-error", json!({ "error": error })),
        }
    }

    fn save_chat_settings(&mut self, payload: &Value) {
        self.chat_settings.merge(payload);
        let saved = match &self.chat_settings_path {
            Some(path) => self.chat_settings.save(path).map_err(|e| e.to_string()),
            None => Ok(()),
        };
        match saved {
            Ok(()) => {
                tracing::info!(provider = %self.chat_settings.provider, "chat settings saved");
                self.send_chat("chat-config-saved", json!({ "ok": true }));
                let config = self.chat_settings.public_view();
                self.send_chat("chat-config-update", config);
            }
            Err(error) => {
                tracing::warn!("failed to save chat settings: {error}");
                self.send_chat("chat-config-saved", json!({ "ok": false, "error": error }));
            }
        }
    }

    /// List models for the provider in the settings form. A blank key in
    /// the form falls back to the saved one.
    fn request_model_list(&mut self, payload: &Value) {
        let name = payload
            .get("provider")
            .and_then(Value::as_str)
            .unwrap_or(self.chat_settings.provider.as_str())
            .to_string();
        let Some(provider) = Provider::from_name(&name) else {
            self.send_chat("chat-models", json!({ "provider": name, "error": "Unknown provider" }));
            return;
        };
        let key = payload
            .get("apiKey")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| self.chat_settings.api_key())
            .unwrap_or("")
            .to_string();
        let Some(handle) = self.runtime_handle() else {
            return;
        };

        let tx = self.cmd_tx.clone();
        handle.spawn(async move {
            let result = list_models(provider, &key).await.map_err(|e| e.to_string());
            let _ = tx.send(AppCommand::ChatModels {
                provider: provider.as_str().to_string(),
                result,
            });
        });
    }

    pub(in crate::app_state) fn handle_chat_models(
        &mut self,
        provider: String,
        result: Result<Vec<String>, String>,
    ) {
        let payload = match result {
            Ok(models) => json!({ "provider": provider, "models": models }),
            Err(error) => json!({ "provider": provider, "error": error }),
        };
        self.send_chat("chat-models", payload);
    }

    fn current_chat_rect(&self) -> Rect {
        self.overlays
            .chat_rect
            .unwrap_or_else(|| layout::chat_initial_rect(self.inner_rect()))
    }

    fn set_chat_pin(&mut self, mode: PinMode) {
        let inner = self.inner_rect();
        let rect = self.current_chat_rect();
        self.overlays.chat_pin = mode;
        self.overlays.chat_anchor = None;
        match mode {
            PinMode::None => self.overlays.chat_rect = Some(rect),
            PinMode::Fixed => {
                self.overlays.chat_rect = Some(rect);
                self.overlays.chat_anchor = Some((inner.x + inner.width - rect.x, rect.y - inner.y));
            }
            PinMode::Smart => self.overlays.chat_rect = Some(layout::smart_snap(rect, inner)),
        }
        self.place_chat();
        self.send_chat("chat-pin-update", pin_payload(mode));
    }

    /// The page finished a drag or resize.
    fn move_chat(&mut self, rect: Rect) {
        let inner = self.inner_rect();
        let rect = match self.overlays.chat_pin {
            PinMode::Smart => layout::smart_snap(rect, inner),
            _ => rect,
        };
        self.overlays.chat_rect = Some(rect);
        if self.overlays.chat_pin == PinMode::Fixed {
            self.overlays.chat_anchor = Some((inner.x + inner.width - rect.x, rect.y - inner.y));
        }
        self.place_chat();
    }

    fn place_chat(&mut self) {
        if self.overlays.is_visible(CHAT) {
            self.set_overlay_visible(CHAT, true);
        }
    }

    /// Follow a window resize according to the pin mode.
    pub(in crate::app_state) fn relayout_chat(&mut self) {
        let Some(rect) = self.overlays.chat_rect else {
            return;
        };
        let inner = self.inner_rect();
        let next = match self.overlays.chat_pin {
            PinMode::None => rect,
            PinMode::Smart => layout::smart_snap(rect, inner),
            PinMode::Fixed => match self.overlays.chat_anchor {
                Some((right, top)) => Rect::new(inner.x + inner.width - right, inner.y + top, rect.width, rect.height),
                None => rect,
            },
        };
        self.overlays.chat_rect = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;
    use crate::app_state::webview_bridge::DetachedHost;

    fn sent(app: &ArviewApp) -> Vec<(String, Value)> {
        app.mailbox.pending(ViewId::Overlay(CHAT)).to_vec()
    }

    fn last_sent(app: &ArviewApp, kind: &str) -> Option<Value> {
        sent(app)
            .into_iter()
            .rev()
            .find(|(k, _)| k == kind)
            .map(|(_, payload)| payload)
    }

    #[test]
    fn show_sends_history_and_public_config() {
        let mut app = test_support::app();
        app.show_overlay(CHAT);
        let state = last_sent(&app, "chat-history").unwrap();
        assert_eq!(state["messages"], json!([]));
        assert_eq!(state["config"]["hasKey"], json!(false));
        assert!(state["config"].get("apiKey").is_none());
        assert_eq!(state["pin"], json!({ "mode": "none", "draggable": true }));
    }

    #[test]
    fn missing_key_reports_error() {
        let mut app = test_support::app();
        app.handle_chat_message("chat-send", &json!({ "text": "hi" }));
        let error = last_sent(&app, "chat-error").unwrap();
        assert_eq!(
            error["error"],
            json!("No API key set for openai. Open Settings and add one.")
        );
    }

    #[test]
    fn save_config_merges_without_leaking_key() {
        let mut app = test_support::app();
        app.handle_chat_message(
            "chat-save-config",
            &json!({ "provider": "anthropic", "apiKey": "sk-test" }),
        );
        assert_eq!(app.chat_settings.provider, "anthropic");
        assert_eq!(app.chat_settings.api_key(), Some("sk-test"));
        assert_eq!(last_sent(&app, "chat-config-saved").unwrap()["ok"], json!(true));
        let update = last_sent(&app, "chat-config-update").unwrap();
        assert_eq!(update["hasKey"], json!(true));
        assert!(!update.to_string().contains("sk-test"));
    }

    #[test]
    fn unknown_provider_lists_no_models() {
        let mut app = test_support::app();
        app.handle_chat_message("chat-list-models", &json!({ "provider": "bard" }));
        let reply = last_sent(&app, "chat-models").unwrap();
        assert_eq!(reply["provider"], json!("bard"));
        assert_eq!(reply["error"], json!("Unknown provider"));
    }

    #[test]
    fn replies_are_forwarded() {
        let mut app = test_support::app();
        app.handle_chat_reply(Ok("hello".into()));
        assert_eq!(
            last_sent(&app, "chat-reply").unwrap(),
            json!({ "role": "assistant", "text": "hello" })
        );
        app.handle_chat_models("openai".into(), Ok(vec!["gpt-4o".into()]));
        assert_eq!(last_sent(&app, "chat-models").unwrap()["models"], json!(["gpt-4o"]));
    }

    #[test]
    fn smart_pin_snaps_to_a_candidate() {
        let mut app = test_support::app();
        app.handle_chat_message("chat-pin", &json!({ "mode": "smart" }));
        let inner = app.inner_rect();
        let rect = app.overlays.chat_rect.unwrap();
        assert!(layout::snap_candidates(inner).contains(&rect));
        assert_eq!(
            last_sent(&app, "chat-pin-update").unwrap(),
            json!({ "mode": "smart", "draggable": true })
        );
    }

    #[test]
    fn fixed_pin_keeps_offset_from_top_right() {
        let mut app = test_support::app();
        app.handle_chat_message(
            "chat-move",
            &json!({ "x": 700.0, "y": 100.0, "width": 400.0, "height": 500.0 }),
        );
        app.handle_chat_message("chat-pin", &json!({ "mode": "fixed" }));
        let before = app.inner_rect();
        let offset = before.x + before.width - 700.0;

        app.coordinator
            .tabs_mut()
            .set_window_size(1600.0, 900.0, &mut DetachedHost);
        app.relayout_chat();

        let inner = app.inner_rect();
        let rect = app.overlays.chat_rect.unwrap();
        assert_eq!(rect.x, inner.x + inner.width - offset);
        assert_eq!(rect.y, 100.0);
        assert_eq!((rect.width, rect.height), (400.0, 500.0));
    }

    #[test]
    fn free_panel_keeps_its_rect() {
        let mut app = test_support::app();
        let rect = Rect::new(10.0, 20.0, 400.0, 500.0);
        app.handle_chat_message(
            "chat-move",
            &json!({ "x": 10.0, "y": 20.0, "width": 400.0, "height": 500.0 }),
        );
        app.relayout_chat();
        assert_eq!(app.overlays.chat_rect, Some(rect));
    }

    #[test]
    fn bad_pin_and_move_are_ignored() {
        let mut app = test_support::app();
        app.handle_chat_message("chat-pin", &json!({ "mode": "sideways" }));
        app.handle_chat_message("chat-move", &json!({ "x": 1.0 }));
        assert_eq!(app.overlays.chat_pin, PinMode::None);
        assert_eq!(app.overlays.chat_rect, None);
    }
}
