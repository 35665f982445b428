//! Command palette: query resolution and the palette page's messages.

use arview_common::Action;
use arview_webview::ViewId;
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;

use super::PALETTE;

/// What a submitted palette query does.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::app_state) enum PaletteQuery {
    /// `:command`
    Command(Action),
    /// Open a new web tab.
    Open(String),
    /// Search with the configured engine.
    Search(String),
}

/// Resolve what the user typed. Blank input and unknown `:commands` do
/// nothing.
pub(in crate::app_state) fn resolve_query(input: &str, search_engine: &str) -> Option<PaletteQuery> {
    let query = input.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(command) = query.strip_prefix(':') {
        let action = Action::from_internal_command(command);
        if action.is_none() {
            tracing::warn!(command, "unknown palette command");
        }
        return action.map(PaletteQuery::Command);
    }
    if query.starts_with("http://") || query.starts_with("https://") {
        return Some(PaletteQuery::Open(query.to_string()));
    }
    if query.contains('.') && !query.contains(char::is_whitespace) {
        return Some(PaletteQuery::Open(format!("https://{query}")));
    }
    Some(PaletteQuery::Search(
        search_engine.replace("%s", &urlencoding::encode(query)),
    ))
}

impl ArviewApp {
    pub(super) fn send_palette_show(&mut self) {
        let actions: Vec<Value> = Action::palette_actions()
            .into_iter()
            .map(|action| json!({ "label": action.label(), "action": action }))
            .collect();
        let payload = json!({
            "quickActions": {
                "switchToWeb": self.config.command_palette.quick_actions.switch_to_web,
                "switchToPdf": self.config.command_palette.quick_actions.switch_to_pdf,
                "goBack": self.config.command_palette.quick_actions.go_back,
                "goForward": self.config.command_palette.quick_actions.go_forward,
            },
            "actions": actions,
        });
        self.send_ipc(ViewId::Overlay(PALETTE), "palette-show", payload);
    }

    pub(super) fn handle_palette_message(&mut self, kind: &str, payload: &Value) {
        match kind {
            "palette-execute" => {
                let input = payload.get("query").and_then(Value::as_str).unwrap_or("");
                self.hide_overlay(PALETTE);
                self.execute_palette_query(input);
            }
            "palette-cancel" => self.hide_overlay(PALETTE),
            "palette-tab-command" => {
                let action = match payload.get("command").and_then(Value::as_str) {
                    Some("web-switch") => Action::SwitchToWebTab,
                    Some("pdf-switch") => Action::SwitchToDocumentTab,
                    Some("back") => Action::NavigateBack,
                    Some("forward") => Action::NavigateForward,
                    other => {
                        tracing::warn!(command = ?other, "unknown palette tab command");
                        return;
                    }
                };
                self.hide_overlay(PALETTE);
                self.dispatch(action);
            }
            _ => tracing::warn!(kind, "unhandled palette message"),
        }
    }

    pub(in crate::app_state) fn execute_palette_query(&mut self, input: &str) {
        let engine = self.config.command_palette.default_search_engine.clone();
        match resolve_query(input, &engine) {
            Some(PaletteQuery::Command(action)) => self.dispatch(action),
            Some(PaletteQuery::Open(url)) => self.dispatch(Action::OpenUrl(url)),
            Some(PaletteQuery::Search(url)) => self.navigate_web(&url),
            None => {}
        }
    }

    /// Load `url` in the most recent web tab, or a new one.
    pub(in crate::app_state) fn navigate_web(&mut self, url: &str) {
        let navigated = self.with_host(|coordinator, host| {
            let tabs = coordinator.tabs_mut();
            match tabs.last_web_tab() {
                Some(id) => tabs.navigate_tab(id, url, host),
                None => false,
            }
        });
        if !navigated {
            self.dispatch(Action::OpenUrl(url.to_string()));
        }
    }
}
