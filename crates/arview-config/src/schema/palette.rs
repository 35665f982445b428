//! Command palette geometry, search engine and quick-action triggers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandPaletteConfig {
    /// Width in pixels (valid range: 200-1200).
    pub width: u32,
    /// Height in pixels (valid range: 40-200).
    pub height: u32,
    /// Distance from the top of the window (valid range: 0-500).
    pub top_offset: u32,
    /// Search URL; `%s` is replaced by the encoded query.
    pub default_search_engine: String,
    pub quick_actions: QuickActions,
}

impl Default for CommandPaletteConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 60,
            top_offset: 120,
            default_search_engine: "https://www.google.com/search?q=%s".into(),
            quick_actions: QuickActions::default(),
        }
    }
}

/// Single-key triggers typed into the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickActions {
    pub switch_to_web: String,
    pub switch_to_pdf: String,
    pub go_back: String,
    pub go_forward: String,
}

impl Default for QuickActions {
    fn default() -> Self {
        Self {
            switch_to_web: "s".into(),
            switch_to_pdf: "p".into(),
            go_back: "b".into(),
            go_forward: "f".into(),
        }
    }
}
