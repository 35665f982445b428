//! Outbound IPC held back until a page has finished loading.
//!
//! Messages sent to a view whose page is still loading would be dropped by
//! the page, so they wait here and are flushed on `PageLoad::Finished`.

use std::collections::{HashMap, HashSet};

use arview_webview::ViewId;
use serde_json::Value;

#[derive(Debug, Default)]
pub(in crate::app_state) struct ViewMailbox {
    loaded: HashSet<ViewId>,
    pending: HashMap<ViewId, Vec<(String, Value)>>,
}

impl ViewMailbox {
    /// Queue a message, or hand it back when the view can take it now.
    pub fn post(&mut self, view: ViewId, kind: &str, payload: Value) -> Option<(String, Value)> {
        if self.loaded.contains(&view) {
            return Some((kind.to_string(), payload));
        }
        self.pending
            .entry(view)
            .or_default()
            .push((kind.to_string(), payload));
        None
    }

    /// A navigation started; hold messages until it finishes.
    pub fn mark_loading(&mut self, view: ViewId) {
        self.loaded.remove(&view);
    }

    /// Returns the queued messages in send order.
    pub fn mark_loaded(&mut self, view: ViewId) -> Vec<(String, Value)> {
        self.loaded.insert(view);
        self.pending.remove(&view).unwrap_or_default()
    }

    pub fn forget(&mut self, view: ViewId) {
        self.loaded.remove(&view);
        self.pending.remove(&view);
    }

    pub fn is_loaded(&self, view: ViewId) -> bool {
        self.loaded.contains(&view)
    }

    pub fn pending(&self, view: ViewId) -> &[(String, Value)] {
        self.pending.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }
}
