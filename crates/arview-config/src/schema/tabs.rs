//! Tab bar appearance.

use serde::{Deserialize, Serialize};

/// Tab bar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Bar height in pixels (valid range: 16-128).
    pub height: u32,
    pub show: bool,
    pub background: String,
    pub active_tab_background: String,
    pub active_tab_text: String,
    pub inactive_tab_background: String,
    pub inactive_tab_text: String,
    pub hover_background: String,
    pub hover_text: String,
    pub separator_color: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            height: 32,
            show: false,
            background: "#181616".into(),
            active_tab_background: "#181616".into(),
            active_tab_text: "#ffffff".into(),
            inactive_tab_background: "#181616".into(),
            inactive_tab_text: "#9e9a96".into(),
            hover_background: "#181616".into(),
            hover_text: "#ffffff".into(),
            separator_color: "#8d9a7e".into(),
        }
    }
}

impl TabsConfig {
    /// Every color field with its dotted config name, for validation.
    pub fn colors(&self) -> [(&'static str, &str); 8] {
        [
            ("tabs.background", &self.background),
            ("tabs.active_tab_background", &self.active_tab_background),
            ("tabs.active_tab_text", &self.active_tab_text),
            ("tabs.inactive_tab_background", &self.inactive_tab_background),
            ("tabs.inactive_tab_text", &self.inactive_tab_text),
            ("tabs.hover_background", &self.hover_background),
            ("tabs.hover_text", &self.hover_text),
            ("tabs.separator_color", &self.separator_color),
        ]
    }
}
