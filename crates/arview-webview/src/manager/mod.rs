//! Webview lifecycle management.
//!
//! `WebViewManager` builds `wry::WebView` children of the main window and
//! funnels their callbacks into one event queue. `WebViewRegistry` owns the
//! resulting handles, one per [`ViewId`](crate::ViewId).

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

pub(crate) type EventQueue = Arc<Mutex<Vec<WebViewEvent>>>;

pub struct WebViewManager {
    pub(crate) events: EventQueue,
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
        }
    }

    /// Take every queued event.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        push(&self.events, event);
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn push(events: &EventQueue, event: WebViewEvent) {
    if let Ok(mut queue) = events.lock() {
        queue.push(event);
    }
}
