use std::collections::HashMap;

use tracing::debug;
use wry::raw_window_handle;

use crate::errors::WebViewError;
use crate::events::WebViewEvent;
use crate::view::ViewId;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Owns every live webview, keyed by [`ViewId`].
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<ViewId, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    pub fn manager(&self) -> &WebViewManager {
        &self.manager
    }

    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        view: ViewId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<(), WebViewError> {
        if self.handles.contains_key(&view) {
            return Err(WebViewError::AlreadyExists(view));
        }
        let handle = self.manager.create(view, window, bounds, config)?;
        self.handles.insert(view, handle);
        Ok(())
    }

    pub fn get(&self, view: ViewId) -> Option<&WebViewHandle> {
        self.handles.get(&view)
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&view)
    }

    /// Like [`get_mut`](Self::get_mut) but an error when missing.
    pub fn require(&mut self, view: ViewId) -> Result<&mut WebViewHandle, WebViewError> {
        self.handles
            .get_mut(&view)
            .ok_or(WebViewError::NotFound(view))
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.handles.contains_key(&view)
    }

    pub fn destroy(&mut self, view: ViewId) -> bool {
        if self.handles.remove(&view).is_some() {
            debug!(%view, "webview destroyed");
            self.manager.push_event(WebViewEvent::Closed { view });
            true
        } else {
            false
        }
    }

    pub fn views(&self) -> Vec<ViewId> {
        let mut views: Vec<ViewId> = self.handles.keys().copied().collect();
        views.sort();
        views
    }

    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.manager.drain_events()
    }

    /// Drop every webview. Used on shutdown.
    pub fn destroy_all(&mut self) {
        for view in self.views() {
            self.destroy(view);
        }
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }
}
