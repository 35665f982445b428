//! WebView lifecycle: the host borrow, overlay creation, bounds sync and
//! event polling.

use arview_common::{Rect, TabKind};
use arview_tabs::{SurfaceHost, WorkspaceCoordinator};
use arview_webview::content::overlay_url;
use arview_webview::{PageLoadState, ViewId, WebViewConfig, WebViewEvent};
use serde_json::{json, Value};

use crate::app_state::core::ArviewApp;
use crate::app_state::overlays::BACKDROP;

use super::bounds::rect_to_wry;
use super::host::{DetachedHost, WebViewHost};

impl ArviewApp {
    /// Run `f` with the coordinator and a host over the live webviews, or a
    /// detached host before the window exists.
    pub(in crate::app_state) fn with_host<R>(
        &mut self,
        f: impl FnOnce(&mut WorkspaceCoordinator, &mut dyn SurfaceHost) -> R,
    ) -> R {
        match (&self.window, &mut self.webviews) {
            (Some(window), Some(registry)) => {
                let mut host = WebViewHost::new(
                    window.as_ref(),
                    registry,
                    &mut self.mailbox,
                    &mut self.surface_serial,
                );
                f(&mut self.coordinator, &mut host)
            }
            _ => f(&mut self.coordinator, &mut DetachedHost),
        }
    }

    /// Send `kind` to `view` now, or once its page has loaded.
    pub(in crate::app_state) fn send_ipc(&mut self, view: ViewId, kind: &str, payload: Value) {
        let Some((kind, payload)) = self.mailbox.post(view, kind, payload) else {
            return;
        };
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(view)) else {
            return;
        };
        if let Err(e) = handle.send_ipc(&kind, &payload) {
            tracing::warn!(%view, kind, error = %e, "failed to send IPC");
        }
    }

    /// Create the page for an overlay, hidden, unless it already exists
    /// above every tab surface. Returns whether the overlay is usable.
    pub(in crate::app_state) fn ensure_overlay(&mut self, name: &'static str) -> bool {
        let view = ViewId::Overlay(name);
        let rect = self.overlay_rect(name);
        let (Some(window), Some(registry)) = (&self.window, &mut self.webviews) else {
            return false;
        };

        if registry.contains(view) {
            // Child webviews stack in creation order; rebuild an overlay
            // that a newer tab surface has covered.
            if self.overlays.created_at(name) >= self.surface_serial {
                return true;
            }
            registry.destroy(view);
            self.mailbox.forget(view);
        }

        let config = WebViewConfig::overlay(overlay_url(name));
        if let Err(e) = registry.create(view, window.as_ref(), rect_to_wry(&rect), config) {
            tracing::error!(%view, error = %e, "failed to create overlay");
            return false;
        }
        self.mailbox.mark_loading(view);
        self.overlays.set_created_at(name, self.surface_serial);
        tracing::info!(%view, "overlay created");
        true
    }

    /// Show or hide an overlay's webview. Showing places it first and gives
    /// it focus; hiding returns focus to the window.
    pub(in crate::app_state) fn set_overlay_visible(&mut self, name: &'static str, visible: bool) {
        let view = ViewId::Overlay(name);
        let rect = self.overlay_rect(name);
        let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(view)) else {
            return;
        };
        if visible {
            if let Err(e) = handle.set_bounds(rect_to_wry(&rect)) {
                tracing::warn!(%view, error = %e, "failed to place overlay");
            }
        }
        if let Err(e) = handle.set_visible(visible) {
            tracing::warn!(%view, error = %e, "failed to change overlay visibility");
        }
        let focus = if visible {
            handle.focus()
        } else {
            handle.focus_parent()
        };
        if let Err(e) = focus {
            tracing::debug!(%view, error = %e, "focus change failed");
        }
    }

    /// Full-window page painted in the background color, created before any
    /// tab so it stays underneath.
    pub(in crate::app_state) fn create_backdrop(&mut self) {
        let (width, height) = self.window_size();
        let html = backdrop_html(self.background());
        let (Some(window), Some(registry)) = (&self.window, &mut self.webviews) else {
            return;
        };
        let rect = Rect::new(0.0, 0.0, width, height);
        let config = WebViewConfig {
            local_only: true,
            ..WebViewConfig::with_html(html)
        };
        if let Err(e) = registry.create(ViewId::Overlay(BACKDROP), window.as_ref(), rect_to_wry(&rect), config) {
            tracing::warn!(error = %e, "failed to create backdrop");
        }
    }

    /// Repaint the backdrop after a background change.
    pub(in crate::app_state) fn refresh_backdrop(&mut self) {
        let html = backdrop_html(self.background());
        if let Some(handle) = self
            .webviews
            .as_mut()
            .and_then(|r| r.get_mut(ViewId::Overlay(BACKDROP)))
        {
            if let Err(e) = handle.load_html(&html) {
                tracing::warn!(error = %e, "failed to repaint backdrop");
            }
        }
    }

    /// Sync every webview to the current window size.
    pub(in crate::app_state) fn sync_webview_bounds(&mut self) {
        let (width, height) = self.window_size();
        self.with_host(|coordinator, host| {
            coordinator.tabs_mut().set_window_size(width, height, host);
        });
        self.relayout_chat();

        let Some(registry) = self.webviews.as_ref() else {
            return;
        };
        let mut placements = vec![(ViewId::Overlay(BACKDROP), Rect::new(0.0, 0.0, width, height))];
        for name in self.overlays.visible() {
            placements.push((ViewId::Overlay(name), self.overlay_rect(name)));
        }
        for (view, rect) in placements {
            if let Some(handle) = registry.get(view) {
                if let Err(e) = handle.set_bounds(rect_to_wry(&rect)) {
                    tracing::warn!(%view, error = %e, "failed to update webview bounds");
                }
            }
        }
    }

    /// Process pending webview events (IPC messages, page loads, titles).
    pub(in crate::app_state) fn poll_webview_events(&mut self) {
        let events: Vec<WebViewEvent> = match &self.webviews {
            Some(registry) => registry.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { view, body } => {
                    self.handle_ipc_message(view, &body);
                }
                WebViewEvent::PageLoad { view, state, url } => {
                    tracing::debug!(%view, ?state, url = %url, "page load");
                    self.handle_page_load(view, state, url);
                }
                WebViewEvent::TitleChanged { view, title } => {
                    if let Some(tab) = view.tab() {
                        self.coordinator.tabs_mut().set_title(tab, &title);
                    }
                    if let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(view)) {
                        handle.set_title(title);
                    }
                }
                WebViewEvent::NavigationRequested { view, url } => {
                    tracing::debug!(%view, url = %url, "navigation");
                }
                WebViewEvent::Closed { view } => {
                    tracing::debug!(%view, "webview closed");
                }
            }
        }
    }

    fn handle_page_load(&mut self, view: ViewId, state: PageLoadState, url: String) {
        match state {
            PageLoadState::Started => {
                self.mailbox.mark_loading(view);
                if let Some(tab) = view.tab() {
                    self.coordinator.tabs_mut().record_navigation(tab, &url);
                }
                if let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(view)) {
                    handle.set_url(url);
                }
            }
            PageLoadState::Finished => {
                let queued = self.mailbox.mark_loaded(view);
                self.send_ipc(view, "theme", self.theme_payload());
                let is_document = view
                    .tab()
                    .and_then(|tab| self.coordinator.tabs().tab(tab))
                    .is_some_and(|t| t.kind != TabKind::Web);
                if is_document {
                    self.send_ipc(view, "viewer-config", self.viewer_config_payload());
                }
                for (kind, payload) in queued {
                    self.send_ipc(view, &kind, payload);
                }
            }
        }
    }

    /// Colors shared by every page.
    pub(in crate::app_state) fn theme_payload(&self) -> Value {
        let tab_colors: serde_json::Map<String, Value> = self
            .config
            .tabs
            .colors()
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        json!({
            "background": self.background(),
            "colors": self.config.appearance.colors,
            "tabColors": tab_colors,
        })
    }

    /// Rendering settings for document viewer pages.
    pub(in crate::app_state) fn viewer_config_payload(&self) -> Value {
        json!({
            "background": self.background(),
            "pageGap": self.config.appearance.page_gap,
            "pageRadius": self.config.appearance.page_radius,
            "pdf": self.config.pdf_viewer,
        })
    }
}

fn backdrop_html(background: &str) -> String {
    format!(
        "<!doctype html><html><body style=\"margin:0;background:{background}\"></body></html>"
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;

    #[test]
    fn backdrop_uses_background() {
        assert!(backdrop_html("#181616").contains("background:#181616"));
    }

    #[test]
    fn theme_payload_carries_ui_and_tab_colors() {
        let app = test_support::app();
        let theme = app.theme_payload();
        assert_eq!(theme["background"], "#181616");
        assert_eq!(theme["colors"]["accent"], "#8ab4ff");
        assert_eq!(theme["tabColors"].as_object().unwrap().len(), 8);
    }

    #[test]
    fn background_override_wins() {
        let mut app = test_support::app();
        app.background_override = Some("#000000".into());
        assert_eq!(app.theme_payload()["background"], "#000000");
        assert_eq!(app.viewer_config_payload()["background"], "#000000");
    }

    #[test]
    fn send_ipc_without_window_queues() {
        let mut app = test_support::app();
        let view = ViewId::Overlay("chat");
        app.send_ipc(view, "chat-reply", json!({"text": "hi"}));
        assert_eq!(app.mailbox.pending(view).len(), 1);
    }

    #[test]
    fn detached_host_keeps_bookkeeping() {
        let mut app = test_support::app();
        let id = app.with_host(|c, host| c.open_url("https://a.com", host)).unwrap();
        assert_eq!(app.coordinator.tabs().active_id(), Some(id));
        assert!(!app.ensure_overlay("palette"));
    }
}
