//! `SurfaceHost` over the webview registry.

use std::path::PathBuf;

use arview_common::{Rect, TabId};
use arview_tabs::{SurfaceContent, SurfaceHost, TabError};
use arview_webview::content::{self, viewer_url};
use arview_webview::{ViewId, WebViewConfig, WebViewRegistry};
use serde_json::{json, Value};
use winit::window::Window;

use super::bounds::rect_to_wry;
use super::mailbox::ViewMailbox;

/// Tab surfaces as child webviews of the main window.
pub(in crate::app_state) struct WebViewHost<'a> {
    window: &'a Window,
    registry: &'a mut WebViewRegistry,
    mailbox: &'a mut ViewMailbox,
    serial: &'a mut u64,
}

impl<'a> WebViewHost<'a> {
    pub fn new(
        window: &'a Window,
        registry: &'a mut WebViewRegistry,
        mailbox: &'a mut ViewMailbox,
        serial: &'a mut u64,
    ) -> Self {
        Self {
            window,
            registry,
            mailbox,
            serial,
        }
    }

    fn allow(&self, content: &SurfaceContent) {
        if !content.kind.is_document() {
            return;
        }
        if let Some(provider) = self.registry.manager().content_provider() {
            provider.allow_document(PathBuf::from(&content.target));
        }
    }

    fn post(&mut self, view: ViewId, kind: &str, payload: Value) {
        let Some((kind, payload)) = self.mailbox.post(view, kind, payload) else {
            return;
        };
        if let Some(handle) = self.registry.get(view) {
            if let Err(e) = handle.send_ipc(&kind, &payload) {
                tracing::warn!(%view, kind, error = %e, "failed to send IPC");
            }
        }
    }
}

impl SurfaceHost for WebViewHost<'_> {
    fn create(&mut self, tab: TabId, content: &SurfaceContent) -> Result<(), TabError> {
        self.allow(content);
        let view = ViewId::Tab(tab);
        let config = WebViewConfig {
            visible: false,
            local_only: content.kind.is_document(),
            ..WebViewConfig::with_url(viewer_url(content.kind, &content.target))
        };
        self.registry
            .create(view, self.window, rect_to_wry(&Rect::ZERO), config)
            .map_err(|e| TabError::Surface(e.to_string()))?;
        self.mailbox.mark_loading(view);
        *self.serial += 1;
        tracing::info!(%view, kind = content.kind.as_str(), "tab surface created");
        Ok(())
    }

    fn destroy(&mut self, tab: TabId) {
        let view = ViewId::Tab(tab);
        self.mailbox.forget(view);
        if self.registry.destroy(view) {
            tracing::debug!(%view, "tab surface destroyed");
        }
    }

    fn set_bounds(&mut self, tab: TabId, bounds: Rect) {
        let view = ViewId::Tab(tab);
        if let Some(handle) = self.registry.get(view) {
            if let Err(e) = handle.set_bounds(rect_to_wry(&bounds)) {
                tracing::warn!(%view, error = %e, "failed to update webview bounds");
            }
        }
    }

    fn set_visible(&mut self, tab: TabId, visible: bool) {
        let view = ViewId::Tab(tab);
        if let Some(handle) = self.registry.get_mut(view) {
            if let Err(e) = handle.set_visible(visible) {
                tracing::warn!(%view, error = %e, "failed to change visibility");
            }
        }
    }

    fn load(&mut self, tab: TabId, content: &SurfaceContent) {
        self.allow(content);
        let view = ViewId::Tab(tab);
        let url = viewer_url(content.kind, &content.target);
        if let Some(handle) = self.registry.get_mut(view) {
            self.mailbox.mark_loading(view);
            if let Err(e) = handle.load_url(&url) {
                tracing::warn!(%view, url, error = %e, "failed to load");
            }
        }
    }

    fn reload(&mut self, tab: TabId) {
        let view = ViewId::Tab(tab);
        let Some(url) = self.registry.get(view).map(|h| h.current_url().to_string()) else {
            return;
        };
        // Viewer pages re-fetch the document themselves and keep their
        // scroll position and zoom.
        if url.starts_with(content::ORIGIN) {
            self.post(view, "reload", json!({}));
            return;
        }
        if let Some(handle) = self.registry.get(view) {
            if let Err(e) = handle.reload() {
                tracing::warn!(%view, error = %e, "failed to reload");
            }
        }
    }

    fn restore_view_state(&mut self, tab: TabId, state: &Value) {
        self.post(ViewId::Tab(tab), "restore-view-state", state.clone());
    }
}

/// Used before the window exists and in tests: bookkeeping only.
pub(in crate::app_state) struct DetachedHost;

impl SurfaceHost for DetachedHost {
    fn create(&mut self, _tab: TabId, _content: &SurfaceContent) -> Result<(), TabError> {
        Ok(())
    }

    fn destroy(&mut self, _tab: TabId) {}

    fn set_bounds(&mut self, _tab: TabId, _bounds: Rect) {}

    fn set_visible(&mut self, _tab: TabId, _visible: bool) {}

    fn load(&mut self, _tab: TabId, _content: &SurfaceContent) {}

    fn reload(&mut self, _tab: TabId) {}

    fn restore_view_state(&mut self, _tab: TabId, _state: &Value) {}
}
