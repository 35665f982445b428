//! Keyboard shortcut configuration.
//!
//! Accelerators are stored verbatim (for example `"CommandOrControl+P"`)
//! and handed to viewer pages as-is.

use serde::{Deserialize, Serialize};

/// One accelerator or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    One(String),
    Many(Vec<String>),
}

impl KeyBinding {
    pub fn accelerators(&self) -> Vec<&str> {
        match self {
            KeyBinding::One(s) => vec![s.as_str()],
            KeyBinding::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for KeyBinding {
    fn from(s: &str) -> Self {
        KeyBinding::One(s.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for KeyBinding {
    fn from(keys: [&str; N]) -> Self {
        KeyBinding::Many(keys.iter().map(|k| k.to_string()).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeyboardConfig {
    pub global: GlobalKeys,
    pub tabs: TabKeys,
    pub pdf_navigation: PdfNavigationKeys,
    pub quick_list: ListKeys,
    pub workspace_switcher: ListKeys,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeys {
    pub command_palette: KeyBinding,
    pub quick_list: KeyBinding,
    pub workspace_switcher: KeyBinding,
    pub add_to_quick_list: KeyBinding,
    pub reload: KeyBinding,
}

impl Default for GlobalKeys {
    fn default() -> Self {
        Self {
            command_palette: "CommandOrControl+P".into(),
            quick_list: "CommandOrControl+/".into(),
            workspace_switcher: "CommandOrControl+Shift+/".into(),
            add_to_quick_list: "CommandOrControl+U".into(),
            reload: "CommandOrControl+R".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabKeys {
    pub new_tab: KeyBinding,
    pub close_tab: KeyBinding,
    pub reopen_tab: KeyBinding,
    pub navigate_back: KeyBinding,
    pub navigate_forward: KeyBinding,
    pub toggle_tab_bar: KeyBinding,
    /// Map CommandOrControl+1..9 to the matching tab.
    pub switch_to_tab: bool,
}

impl Default for TabKeys {
    fn default() -> Self {
        Self {
            new_tab: "CommandOrControl+T".into(),
            close_tab: "CommandOrControl+W".into(),
            reopen_tab: "CommandOrControl+Shift+T".into(),
            navigate_back: "CommandOrControl+Left".into(),
            navigate_forward: "CommandOrControl+Right".into(),
            toggle_tab_bar: "CommandOrControl+Comma".into(),
            switch_to_tab: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfNavigationKeys {
    pub pan_left: KeyBinding,
    pub pan_right: KeyBinding,
    pub pan_up: KeyBinding,
    pub pan_down: KeyBinding,
    pub pan_fast_modifier: KeyBinding,
    pub jump_top: KeyBinding,
    pub jump_bottom: KeyBinding,
    pub page_forward: KeyBinding,
    pub page_back: KeyBinding,
    pub zoom_in: KeyBinding,
    pub zoom_out: KeyBinding,
    pub zoom_reset: KeyBinding,
}

impl Default for PdfNavigationKeys {
    fn default() -> Self {
        Self {
            pan_left: ["h", "ArrowLeft"].into(),
            pan_right: ["l", "ArrowRight"].into(),
            pan_up: ["k", "ArrowUp"].into(),
            pan_down: ["j", "ArrowDown"].into(),
            pan_fast_modifier: "Shift".into(),
            jump_top: "g".into(),
            jump_bottom: "G".into(),
            page_forward: "Enter".into(),
            page_back: "Shift+Enter".into(),
            zoom_in: "CommandOrControl+=".into(),
            zoom_out: "CommandOrControl+-".into(),
            zoom_reset: "CommandOrControl+0".into(),
        }
    }
}

/// Keys for list-style overlays (quick list, workspace switcher).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListKeys {
    pub delete: KeyBinding,
    pub rename: KeyBinding,
    pub navigate_down: KeyBinding,
    pub navigate_up: KeyBinding,
    pub close: KeyBinding,
}

impl Default for ListKeys {
    fn default() -> Self {
        Self {
            delete: "d".into(),
            rename: "r".into(),
            navigate_down: ["ArrowDown", "Alt+J"].into(),
            navigate_up: ["ArrowUp", "Alt+K"].into(),
            close: "Escape".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_accepts_string_or_list() {
        let keys: PdfNavigationKeys = toml::from_str(
            r#"
pan_left = "a"
pan_right = ["d", "ArrowRight"]
"#,
        )
        .unwrap();
        assert_eq!(keys.pan_left.accelerators(), vec!["a"]);
        assert_eq!(keys.pan_right.accelerators(), vec!["d", "ArrowRight"]);
        assert_eq!(keys.pan_up.accelerators(), vec!["k", "ArrowUp"]);
    }

    #[test]
    fn default_globals() {
        let keys = GlobalKeys::default();
        assert_eq!(keys.command_palette, KeyBinding::One("CommandOrControl+P".into()));
    }
}
