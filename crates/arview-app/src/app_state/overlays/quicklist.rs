//! Quick list overlay: saved links for the current context.

use arview_common::TabKind;
use arview_tabs::{QuickList, QuickListStore};
use arview_webview::ViewId;
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;

use super::QUICKLIST;

fn str_field<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(Value::as_str)
}

impl ArviewApp {
    /// The first pdf tab's path, else the general context.
    pub(in crate::app_state) fn quicklist_context(&self) -> String {
        let tabs = self.coordinator.tabs();
        let first_pdf = tabs
            .first_pdf_tab()
            .and_then(|id| tabs.tab(id))
            .map(|tab| tab.target());
        QuickListStore::context_for(first_pdf)
    }

    pub(super) fn send_quicklist(&mut self, kind: &str) {
        if kind == "quicklist-show" {
            self.overlays.quicklist_deleted.clear();
        }
        let context = self.quicklist_context();
        let list = self.quicklists.load(&context);
        let payload = json!({
            "items": list.items,
            "folders": list.folders,
            "context": context,
        });
        self.send_ipc(ViewId::Overlay(QUICKLIST), kind, payload);
    }

    /// Apply `edit` to the current context's list and save it when it
    /// reports a change.
    fn edit_quicklist(&mut self, edit: impl FnOnce(&mut QuickList) -> bool) {
        let context = self.quicklist_context();
        let mut list = self.quicklists.load(&context);
        if edit(&mut list) {
            self.quicklists.save(&context, &list);
            self.send_quicklist("quicklist-refresh");
        }
    }

    /// Save the active web tab, or the most recent one, to the quick list.
    pub(in crate::app_state) fn add_current_to_quicklist(&mut self) {
        let tabs = self.coordinator.tabs();
        let web = tabs
            .active_tab()
            .filter(|t| t.kind == TabKind::Web)
            .map(|t| t.id)
            .or_else(|| tabs.last_web_tab())
            .and_then(|id| tabs.tab(id));
        let Some(tab) = web else {
            tracing::debug!("no web tab to add to the quick list");
            return;
        };
        let (url, title) = (tab.target().to_string(), tab.title.clone());
        self.edit_quicklist(|list| {
            list.add(&url, &title);
            true
        });
    }

    /// Close the quick list, asking first when links were deleted since it
    /// opened.
    pub(in crate::app_state) fn request_quicklist_close(&mut self) {
        if self.overlays.quicklist_deleted.is_empty() {
            self.hide_overlay(QUICKLIST);
            return;
        }
        let titles = self.overlays.quicklist_deleted.clone();
        self.send_ipc(
            ViewId::Overlay(QUICKLIST),
            "quicklist-confirm-close",
            json!({ "deleted": titles }),
        );
    }

    pub(super) fn handle_quicklist_message(&mut self, kind: &str, payload: &Value) {
        match kind {
            "quicklist-get-data" => self.send_quicklist("quicklist-refresh"),
            "quicklist-add" => self.add_current_to_quicklist(),
            "quicklist-delete" => {
                let Some(id) = str_field(payload, "id") else {
                    return;
                };
                let mut deleted = None;
                self.edit_quicklist(|list| {
                    deleted = list.delete(id).map(|item| item.title);
                    deleted.is_some()
                });
                if let Some(title) = deleted {
                    self.overlays.quicklist_deleted.push(title);
                }
            }
            "quicklist-rename" => {
                let (Some(id), Some(title)) = (str_field(payload, "id"), str_field(payload, "newTitle"))
                else {
                    return;
                };
                self.edit_quicklist(|list| list.rename(id, title));
            }
            "quicklist-paste" => {
                let Some(id) = str_field(payload, "id") else {
                    return;
                };
                let folder = str_field(payload, "folderId");
                self.edit_quicklist(|list| list.move_to_folder(id, folder));
            }
            "quicklist-add-folder" => {
                let Some(name) = str_field(payload, "name").filter(|n| !n.trim().is_empty()) else {
                    return;
                };
                self.edit_quicklist(|list| {
                    list.add_folder(name);
                    true
                });
            }
            "quicklist-remove-folder" => {
                let Some(id) = str_field(payload, "id") else {
                    return;
                };
                self.edit_quicklist(|list| list.remove_folder(id));
            }
            "quicklist-navigate" => {
                let Some(url) = str_field(payload, "url") else {
                    return;
                };
                let url = url.to_string();
                self.hide_overlay(QUICKLIST);
                self.navigate_web(&url);
            }
            "quicklist-close" => self.request_quicklist_close(),
            "quicklist-confirm-close-result" => {
                if payload.get("confirm").and_then(Value::as_bool).unwrap_or(false) {
                    self.overlays.quicklist_deleted.clear();
                    self.hide_overlay(QUICKLIST);
                }
            }
            _ => tracing::warn!(kind, "unhandled quick list message"),
        }
    }

    pub(in crate::app_state) fn toggle_quicklist(&mut self) {
        if self.overlays.is_visible(QUICKLIST) {
            self.request_quicklist_close();
        } else {
            self.show_overlay(QUICKLIST);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;
    use crate::app_state::webview_bridge::DetachedHost;
    use std::path::Path;

    fn app_with_web_tab() -> ArviewApp {
        let mut app = test_support::app();
        app.coordinator
            .open_url("https://a.com", &mut DetachedHost)
            .unwrap();
        app
    }

    fn current_list(app: &ArviewApp) -> QuickList {
        app.quicklists.load(&app.quicklist_context())
    }

    #[test]
    fn context_is_first_pdf_or_general() {
        let mut app = app_with_web_tab();
        assert_eq!(app.quicklist_context(), "general");
        app.coordinator
            .open_file(Path::new("/papers/a.pdf"), &mut DetachedHost)
            .unwrap();
        assert_eq!(app.quicklist_context(), "/papers/a.pdf");
    }

    #[test]
    fn add_uses_web_tab_url() {
        let mut app = app_with_web_tab();
        app.handle_quicklist_message("quicklist-add", &Value::Null);
        let list = current_list(&app);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].url, "https://a.com");
        // Untitled tabs fall back to the URL.
        assert_eq!(list.items[0].title, "https://a.com");
    }

    #[test]
    fn delete_then_close_asks_for_confirmation() {
        let mut app = app_with_web_tab();
        app.add_current_to_quicklist();
        app.show_overlay(QUICKLIST);
        let id = current_list(&app).items[0].id.clone();

        app.handle_quicklist_message("quicklist-delete", &json!({ "id": id }));
        assert!(current_list(&app).items.is_empty());
        assert_eq!(app.overlays.quicklist_deleted, vec!["https://a.com".to_string()]);

        app.handle_quicklist_message("quicklist-close", &Value::Null);
        assert!(app.overlays.is_visible(QUICKLIST));

        app.handle_quicklist_message("quicklist-confirm-close-result", &json!({ "confirm": false }));
        assert!(app.overlays.is_visible(QUICKLIST));

        app.handle_quicklist_message("quicklist-confirm-close-result", &json!({ "confirm": true }));
        assert!(!app.overlays.is_visible(QUICKLIST));
        assert!(app.overlays.quicklist_deleted.is_empty());
    }

    #[test]
    fn close_without_deletions_hides() {
        let mut app = test_support::app();
        app.show_overlay(QUICKLIST);
        app.handle_quicklist_message("quicklist-close", &Value::Null);
        assert!(!app.overlays.is_visible(QUICKLIST));
    }

    #[test]
    fn rename_and_folders() {
        let mut app = app_with_web_tab();
        app.add_current_to_quicklist();
        let id = current_list(&app).items[0].id.clone();

        app.handle_quicklist_message("quicklist-rename", &json!({ "id": id, "newTitle": "Alpha" }));
        app.handle_quicklist_message("quicklist-add-folder", &json!({ "name": "Reading" }));
        let folder = current_list(&app).folders[0].id.clone();
        app.handle_quicklist_message("quicklist-paste", &json!({ "id": id, "folderId": folder }));

        let list = current_list(&app);
        assert_eq!(list.items[0].title, "Alpha");
        assert_eq!(list.items[0].folder_id.as_deref(), Some(folder.as_str()));

        app.handle_quicklist_message("quicklist-remove-folder", &json!({ "id": folder }));
        let list = current_list(&app);
        assert!(list.folders.is_empty());
        assert_eq!(list.items[0].folder_id, None);
    }

    #[test]
    fn navigate_loads_in_last_web_tab() {
        let mut app = app_with_web_tab();
        app.show_overlay(QUICKLIST);
        app.handle_quicklist_message("quicklist-navigate", &json!({ "url": "https://b.com" }));
        assert!(!app.overlays.is_visible(QUICKLIST));
        let tabs = app.coordinator.tabs();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.active_tab().unwrap().target(), "https://b.com");
    }
}
