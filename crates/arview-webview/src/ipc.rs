//! JSON message protocol between Rust and the viewer and overlay pages.
//!
//! - **page -> Rust**: `window.arview.ipc.send(kind, payload)` posts
//!   `{"kind": ..., "payload": ...}` through wry's IPC handler.
//! - **Rust -> page**: [`js_dispatch_message`] builds a script that calls the
//!   handler the page registered with `window.arview.ipc.on(kind, fn)`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message posted by a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// The payload as a string, if it is one.
    pub fn text(&self) -> Option<&str> {
        self.payload.as_str()
    }
}

/// Injected into every webview before page scripts run.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.arview = window.arview || {};
    window.arview.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Script that delivers `kind` with `payload` to the page's handler.
pub fn js_dispatch_message(kind: &str, payload: &Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.arview && window.arview.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_message_with_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"view-state","payload":{"page":2}}"#).unwrap();
        assert_eq!(msg.kind, "view-state");
        assert_eq!(msg.payload, json!({"page": 2}));
    }

    #[test]
    fn payload_defaults_to_null() {
        let msg = IpcMessage::from_json(r#"{"kind":"close"}"#).unwrap();
        assert_eq!(msg.payload, Value::Null);
        assert_eq!(msg.text(), None);
    }

    #[test]
    fn rejects_non_messages() {
        assert!(IpcMessage::from_json("[1,2]").is_none());
        assert!(IpcMessage::from_json("not json").is_none());
    }

    #[test]
    fn dispatch_script_escapes_kind() {
        let js = js_dispatch_message("tabs-update", &json!([{"id": 1}]));
        assert_eq!(
            js,
            r#"window.arview && window.arview.ipc._dispatch("tabs-update", [{"id":1}]);"#
        );
        let js = js_dispatch_message("a\"b", &Value::Null);
        assert!(js.contains(r#""a\"b""#));
    }
}
