//! Per-context tab session snapshots.
//!
//! The context of a set of tabs is the first pdf target in order, else the
//! first markdown target, else `"general"`. Sessions are stored under
//! `session_{context}`.

use std::sync::Arc;

use arview_common::{StateStore, StateStoreExt, TabKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::manager::TabManager;

pub const GENERAL_CONTEXT: &str = "general";

/// Persisted form of one tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TabSnapshot {
    Pdf {
        target: String,
        #[serde(default)]
        title: String,
        #[serde(rename = "viewState", default, skip_serializing_if = "Option::is_none")]
        view_state: Option<Value>,
    },
    Markdown {
        target: String,
        #[serde(default)]
        title: String,
        #[serde(rename = "viewState", default, skip_serializing_if = "Option::is_none")]
        view_state: Option<Value>,
    },
    Web {
        target: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        history: Vec<String>,
        #[serde(rename = "historyIndex", default)]
        history_index: usize,
    },
}

impl TabSnapshot {
    pub fn kind(&self) -> TabKind {
        match self {
            TabSnapshot::Pdf { .. } => TabKind::Pdf,
            TabSnapshot::Markdown { .. } => TabKind::Markdown,
            TabSnapshot::Web { .. } => TabKind::Web,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            TabSnapshot::Pdf { target, .. }
            | TabSnapshot::Markdown { target, .. }
            | TabSnapshot::Web { target, .. } => target,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TabSnapshot::Pdf { title, .. }
            | TabSnapshot::Markdown { title, .. }
            | TabSnapshot::Web { title, .. } => title,
        }
    }

    pub fn view_state(&self) -> Option<&Value> {
        match self {
            TabSnapshot::Pdf { view_state, .. } | TabSnapshot::Markdown { view_state, .. } => {
                view_state.as_ref()
            }
            TabSnapshot::Web { .. } => None,
        }
    }
}

/// Ordered snapshots plus the active position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub tabs: Vec<TabSnapshot>,
    #[serde(default)]
    pub active_tab_index: usize,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_saved: i64,
}

impl SessionState {
    /// Capture the mounted tabs of `tabs`.
    pub fn capture(tabs: &TabManager) -> Self {
        Self {
            tabs: tabs.snapshots(),
            active_tab_index: tabs.active_index().unwrap_or(0),
            last_saved: crate::now_millis(),
        }
    }
}

/// Context key for the given snapshots.
pub fn context_key(snapshots: &[TabSnapshot]) -> String {
    snapshots
        .iter()
        .find(|s| s.kind() == TabKind::Pdf)
        .or_else(|| snapshots.iter().find(|s| s.kind() == TabKind::Markdown))
        .map(|s| s.target().to_string())
        .unwrap_or_else(|| GENERAL_CONTEXT.to_string())
}

/// Best-effort session persistence over a [`StateStore`].
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn StateStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub fn store_key(context: &str) -> String {
        format!("session_{context}")
    }

    /// Save under `context`. Failures are logged, never returned.
    pub fn save(&self, context: &str, state: &SessionState) {
        let key = Self::store_key(context);
        match self.store.set_as(&key, state) {
            Ok(()) => debug!(key, tabs = state.tabs.len(), "session saved"),
            Err(e) => warn!(key, "failed to save session: {e}"),
        }
    }

    /// Capture and save the tabs of `tabs` under their own context.
    pub fn save_tabs(&self, tabs: &TabManager) {
        let state = SessionState::capture(tabs);
        self.save(&context_key(&state.tabs), &state);
    }

    /// Load the session for `context`. Missing or unreadable state is `None`.
    pub fn load(&self, context: &str) -> Option<SessionState> {
        let key = Self::store_key(context);
        match self.store.get_as::<SessionState>(&key) {
            Ok(state) => state,
            Err(e) => {
                warn!(key, "failed to load session: {e}");
                None
            }
        }
    }
}
