//! IPC message validation and dispatch from webviews to Rust handlers.
//!
//! Tab pages talk to the app directly. Overlay pages go through the
//! overlay `ChannelManager` under `"{overlay}:{kind}"`, whose handlers
//! queue the message for the main loop.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use arview_common::{ChannelManager, TabId};
use arview_webview::{IpcMessage, ViewId};
use serde_json::Value;

use crate::app_state::core::ArviewApp;
use crate::app_state::overlays::{CHAT, PALETTE, QUICKLIST, SWITCHER, TABBAR};
use crate::keymap::{self, Modifiers};

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

/// Kinds any page may send.
const GLOBAL_IPC_KINDS: &[&str] = &["shortcut"];

/// Kinds sent by document and web tab pages.
const TAB_IPC_KINDS: &[&str] = &["view-state", "synctex-inverse"];

/// Kinds each overlay page may send. Anything else is rejected and logged.
const OVERLAY_IPC_KINDS: &[(&str, &[&str])] = &[
    (
        PALETTE,
        &["palette-execute", "palette-cancel", "palette-tab-command"],
    ),
    (
        QUICKLIST,
        &[
            "quicklist-get-data",
            "quicklist-add",
            "quicklist-delete",
            "quicklist-rename",
            "quicklist-navigate",
            "quicklist-paste",
            "quicklist-add-folder",
            "quicklist-remove-folder",
            "quicklist-close",
            "quicklist-confirm-close-result",
        ],
    ),
    (
        SWITCHER,
        &[
            "workspace-switcher-get-data",
            "workspace-switcher-switch",
            "workspace-switcher-delete",
            "workspace-switcher-rename",
            "workspace-switcher-close",
        ],
    ),
    (
        CHAT,
        &[
            "chat-toggle",
            "chat-hide",
            "chat-send",
            "chat-clear",
            "chat-get-config",
            "chat-save-config",
            "chat-list-models",
            "chat-pin",
            "chat-move",
        ],
    ),
    (TABBAR, &["tab-switch", "tab-close", "tab-new", "chat-toggle"]),
];

/// Check whether `view` may send `kind`.
pub fn is_ipc_kind_allowed(view: ViewId, kind: &str) -> bool {
    if GLOBAL_IPC_KINDS.contains(&kind) {
        return true;
    }
    match view {
        ViewId::Tab(_) => TAB_IPC_KINDS.contains(&kind),
        ViewId::Overlay(name) => OVERLAY_IPC_KINDS
            .iter()
            .any(|(overlay, kinds)| *overlay == name && kinds.contains(&kind)),
    }
}

// =============================================================================
// OVERLAY ROUTES
// =============================================================================

/// An overlay message waiting for the main loop.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::app_state) struct OverlayMessage {
    pub target: &'static str,
    pub kind: String,
    pub payload: Value,
}

pub(in crate::app_state) type OverlayInbox = Arc<Mutex<VecDeque<OverlayMessage>>>;

/// Subscribe one channel handler per allowed overlay kind. Every handler
/// queues into the returned inbox.
pub(in crate::app_state) fn register_overlay_routes(channels: &ChannelManager) -> OverlayInbox {
    let inbox: OverlayInbox = Arc::default();
    for &(target, kinds) in OVERLAY_IPC_KINDS {
        for &kind in kinds {
            let inbox = Arc::clone(&inbox);
            channels.on(target, kind, move |payload, _event| {
                inbox
                    .lock()
                    .map_err(|_| "overlay inbox poisoned".to_string())?
                    .push_back(OverlayMessage {
                        target,
                        kind: kind.to_string(),
                        payload: payload.clone(),
                    });
                Ok(Value::Null)
            });
        }
    }
    inbox
}

// =============================================================================
// DISPATCH
// =============================================================================

impl ArviewApp {
    /// Handle a single IPC message from a webview.
    pub(in crate::app_state) fn handle_ipc_message(&mut self, view: ViewId, body: &str) {
        let msg = match IpcMessage::from_json(body) {
            Some(m) => m,
            None => {
                tracing::warn!(%view, body_len = body.len(), "IPC message rejected: failed to parse");
                return;
            }
        };

        if !is_ipc_kind_allowed(view, &msg.kind) {
            tracing::warn!(%view, kind = %msg.kind, "IPC message rejected: unknown kind");
            return;
        }

        tracing::debug!(%view, kind = %msg.kind, "IPC message dispatched");

        if msg.kind == "shortcut" {
            self.handle_shortcut(&msg.payload);
            return;
        }

        match view {
            ViewId::Tab(tab) => self.handle_tab_ipc(tab, &msg),
            ViewId::Overlay(target) => {
                self.channels.send(target, &msg.kind, &msg.payload);
                self.drain_overlay_inbox();
            }
        }
    }

    /// Handle every queued overlay message in arrival order.
    pub(in crate::app_state) fn drain_overlay_inbox(&mut self) {
        loop {
            let next = self
                .overlay_inbox
                .lock()
                .ok()
                .and_then(|mut queue| queue.pop_front());
            let Some(message) = next else {
                break;
            };
            self.handle_overlay_message(message);
        }
    }

    fn handle_tab_ipc(&mut self, tab: TabId, msg: &IpcMessage) {
        match msg.kind.as_str() {
            "view-state" => {
                let state = msg
                    .payload
                    .get("state")
                    .cloned()
                    .unwrap_or_else(|| msg.payload.clone());
                self.coordinator.tabs_mut().update_view_state(tab, state);
            }
            "synctex-inverse" => self.inverse_search(tab, &msg.payload),
            _ => tracing::warn!(%tab, kind = %msg.kind, "unhandled tab IPC kind"),
        }
    }

    /// Key chords caught by a page while it has focus.
    fn handle_shortcut(&mut self, payload: &Value) {
        let Some(key) = payload.get("key").and_then(Value::as_str) else {
            return;
        };
        let flag = |name: &str| payload.get(name).and_then(Value::as_bool).unwrap_or(false);
        let mods = Modifiers::from_state(flag("ctrl"), flag("meta"), flag("shift"), flag("alt"));
        if let Some(action) = keymap::action_for(key, mods) {
            self.dispatch(action);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
