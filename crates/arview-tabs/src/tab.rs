use arview_common::{TabId, TabKind};
use serde_json::Value;

use crate::history::NavigationHistory;
use crate::session::TabSnapshot;
use crate::surface::SurfaceContent;

/// A mounted tab. Its surface lives in the [`SurfaceHost`](crate::SurfaceHost)
/// under the same id.
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub kind: TabKind,
    pub title: String,
    pub history: NavigationHistory,
    /// Latest view state reported by a document surface.
    pub view_state: Option<Value>,
}

impl Tab {
    pub fn new(id: TabId, kind: TabKind, target: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            history: NavigationHistory::new(target),
            view_state: None,
        }
    }

    /// Current path or URL.
    pub fn target(&self) -> &str {
        self.history.current()
    }

    /// Title for display, falling back to the target.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.target()
        } else {
            &self.title
        }
    }

    pub fn content(&self) -> SurfaceContent {
        SurfaceContent::new(self.kind, self.target())
    }

    pub fn snapshot(&self) -> TabSnapshot {
        match self.kind {
            TabKind::Pdf => TabSnapshot::Pdf {
                target: self.target().to_string(),
                title: self.title.clone(),
                view_state: self.view_state.clone(),
            },
            TabKind::Markdown => TabSnapshot::Markdown {
                target: self.target().to_string(),
                title: self.title.clone(),
                view_state: self.view_state.clone(),
            },
            TabKind::Web => TabSnapshot::Web {
                target: self.target().to_string(),
                title: self.title.clone(),
                history: self.history.entries().to_vec(),
                history_index: self.history.index(),
            },
        }
    }
}

/// Prefix `https://` onto inputs that carry no scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains("://") || trimmed.starts_with("about:") || trimmed.starts_with("data:") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
