//! Tab bar overlay.

use arview_common::TabId;
use arview_webview::ViewId;
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;

use super::{CHAT, PALETTE, TABBAR};

fn tab_id(payload: &Value) -> Option<TabId> {
    payload
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .map(TabId)
}

impl ArviewApp {
    pub(in crate::app_state) fn send_tabs_update(&mut self) {
        if !self.overlays.is_visible(TABBAR) {
            return;
        }
        let tabs = self.coordinator.tabs().tab_summaries();
        self.send_ipc(ViewId::Overlay(TABBAR), "tabs-update", json!({ "tabs": tabs }));
    }

    /// Show or hide the tab bar and give its height back to the content.
    pub(in crate::app_state) fn toggle_tab_bar(&mut self) {
        let show = !self.overlays.is_visible(TABBAR);
        let height = if show {
            f64::from(self.config.tabs.height)
        } else {
            0.0
        };
        self.with_host(|coordinator, host| coordinator.tabs_mut().set_tab_bar_height(height, host));
        if show {
            self.show_overlay(TABBAR);
        } else {
            self.hide_overlay(TABBAR);
        }
    }

    pub(super) fn handle_tabbar_message(&mut self, kind: &str, payload: &Value) {
        match kind {
            "tab-switch" => {
                let Some(id) = tab_id(payload) else {
                    return;
                };
                self.with_host(|coordinator, host| coordinator.tabs_mut().switch_to_tab(id, host));
            }
            "tab-close" => {
                let Some(id) = tab_id(payload) else {
                    return;
                };
                self.with_host(|coordinator, host| coordinator.tabs_mut().close_tab(id, host));
            }
            "tab-new" => self.show_overlay(PALETTE),
            "chat-toggle" => self.toggle_overlay(CHAT),
            _ => tracing::warn!(kind, "unhandled tab bar message"),
        }
    }
}
