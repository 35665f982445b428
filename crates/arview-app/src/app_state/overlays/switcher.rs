//! Workspace switcher overlay.

use arview_common::{Event, WorkspaceId};
use arview_webview::ViewId;
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;

use super::SWITCHER;

/// Workspace ids arrive as strings but older pages send numbers.
fn workspace_id(payload: &Value) -> Option<WorkspaceId> {
    match payload.get("id")? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(WorkspaceId),
        _ => None,
    }
}

impl ArviewApp {
    pub(super) fn send_switcher(&mut self, kind: &str) {
        let workspaces = self.coordinator.workspaces();
        let payload = json!({
            "workspaces": workspaces.summaries(),
            "activeId": workspaces.active_id(),
        });
        self.send_ipc(ViewId::Overlay(SWITCHER), kind, payload);
    }

    /// Mount `id` and point the watcher at its anchor file.
    pub(in crate::app_state) fn switch_workspace(&mut self, id: WorkspaceId) -> bool {
        let result = self.with_host(|coordinator, host| coordinator.switch_workspace(id, host));
        match result {
            Ok(()) => {
                self.event_bus.publish(Event::WorkspaceSwitched(id));
                self.retarget_watcher();
                true
            }
            Err(e) => {
                tracing::warn!(%id, "workspace switch failed: {e}");
                false
            }
        }
    }

    pub(super) fn handle_switcher_message(&mut self, kind: &str, payload: &Value) {
        match kind {
            "workspace-switcher-get-data" => self.send_switcher("workspace-switcher-refresh"),
            "workspace-switcher-switch" => {
                let Some(id) = workspace_id(payload) else {
                    return;
                };
                if self.switch_workspace(id) {
                    self.hide_overlay(SWITCHER);
                }
            }
            "workspace-switcher-delete" => {
                let Some(id) = workspace_id(payload) else {
                    return;
                };
                let was_active = self.coordinator.workspaces().active_id() == Some(id);
                let result = self.with_host(|coordinator, host| coordinator.delete_workspace(id, host));
                match result {
                    Ok(()) if was_active => self.retarget_watcher(),
                    Ok(()) => {}
                    Err(e) => tracing::warn!(%id, "workspace delete failed: {e}"),
                }
                self.send_switcher("workspace-switcher-refresh");
            }
            "workspace-switcher-rename" => {
                let Some(id) = workspace_id(payload) else {
                    return;
                };
                let name = payload.get("name").and_then(Value::as_str).unwrap_or("");
                if let Err(e) = self.coordinator.rename_workspace(id, name) {
                    tracing::warn!(%id, "workspace rename failed: {e}");
                }
                self.send_switcher("workspace-switcher-refresh");
            }
            "workspace-switcher-close" => self.hide_overlay(SWITCHER),
            _ => tracing::warn!(kind, "unhandled workspace switcher message"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;
    use crate::app_state::webview_bridge::DetachedHost;
    use std::path::Path;

    fn app_with_two_workspaces() -> (ArviewApp, WorkspaceId, WorkspaceId) {
        let mut app = test_support::app();
        let a = app
            .coordinator
            .open_file(Path::new("/papers/a.pdf"), &mut DetachedHost)
            .unwrap()
            .id();
        let b = app
            .coordinator
            .open_file(Path::new("/notes/b.md"), &mut DetachedHost)
            .unwrap()
            .id();
        (app, a, b)
    }

    #[test]
    fn ids_parse_from_strings_and_numbers() {
        assert_eq!(workspace_id(&json!({"id": "7"})), Some(WorkspaceId(7)));
        assert_eq!(workspace_id(&json!({"id": 7})), Some(WorkspaceId(7)));
        assert_eq!(workspace_id(&json!({"id": "x"})), None);
        assert_eq!(workspace_id(&json!({})), None);
    }

    #[test]
    fn switch_mounts_and_hides() {
        let (mut app, a, _) = app_with_two_workspaces();
        let mut rx = app.event_bus.subscribe();
        app.show_overlay(SWITCHER);

        app.handle_switcher_message("workspace-switcher-switch", &json!({ "id": a.to_string() }));

        assert!(!app.overlays.is_visible(SWITCHER));
        assert_eq!(app.coordinator.workspaces().active_id(), Some(a));
        assert_eq!(app.coordinator.tabs().active_tab().unwrap().target(), "/papers/a.pdf");
        assert!(matches!(rx.try_recv(), Ok(Event::WorkspaceSwitched(id)) if id == a));
    }

    #[test]
    fn unknown_workspace_keeps_switcher_open() {
        let (mut app, _, b) = app_with_two_workspaces();
        app.show_overlay(SWITCHER);
        app.handle_switcher_message("workspace-switcher-switch", &json!({ "id": "999" }));
        assert!(app.overlays.is_visible(SWITCHER));
        assert_eq!(app.coordinator.workspaces().active_id(), Some(b));
    }

    #[test]
    fn rename_and_delete() {
        let (mut app, a, b) = app_with_two_workspaces();
        app.handle_switcher_message(
            "workspace-switcher-rename",
            &json!({ "id": a.to_string(), "name": "Thesis" }),
        );
        assert_eq!(app.coordinator.workspaces().get(a).unwrap().name(), "Thesis");

        app.handle_switcher_message("workspace-switcher-delete", &json!({ "id": b.to_string() }));
        assert!(app.coordinator.workspaces().get(b).is_none());
        assert_eq!(app.coordinator.workspaces().active_id(), Some(a));
        assert_eq!(app.coordinator.tabs().active_tab().unwrap().target(), "/papers/a.pdf");
    }
}
