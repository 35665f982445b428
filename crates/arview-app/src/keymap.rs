//! Built-in key table.
//!
//! Accelerators in the config file are kept as opaque strings; the app
//! answers a fixed set of chords instead.

use arview_common::Action;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Command on macOS, Control elsewhere.
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn from_state(ctrl: bool, meta: bool, shift: bool, alt: bool) -> Self {
        let primary = if cfg!(target_os = "macos") { meta } else { ctrl };
        Self {
            primary,
            shift,
            alt,
        }
    }
}

/// Lowercase single characters and collapse winit/DOM key names.
pub fn normalize_key(key: &str) -> String {
    match key {
        "ArrowLeft" | "Left" => "Left".into(),
        "ArrowRight" | "Right" => "Right".into(),
        "ArrowUp" | "Up" => "Up".into(),
        "ArrowDown" | "Down" => "Down".into(),
        "Esc" | "Escape" => "Escape".into(),
        "?" => "/".into(),
        "<" => ",".into(),
        k if k.chars().count() == 1 => k.to_lowercase(),
        k => k.to_string(),
    }
}

/// The action bound to `key` with `mods`, if any.
pub fn action_for(key: &str, mods: Modifiers) -> Option<Action> {
    let key = normalize_key(key);
    if !mods.primary {
        return match (key.as_str(), mods.shift, mods.alt) {
            ("Escape", false, false) => Some(Action::CloseOverlay),
            _ => None,
        };
    }

    let action = match (key.as_str(), mods.shift) {
        ("p", false) => Action::ToggleCommandPalette,
        ("/", false) => Action::ToggleQuickList,
        ("/", true) => Action::ToggleWorkspaceSwitcher,
        ("u", false) => Action::AddToQuickList,
        ("r", false) => Action::ReloadTab,
        ("t", false) => Action::NewTab,
        ("t", true) => Action::ReopenClosedTab,
        ("w", false) => Action::CloseTab,
        ("Left", false) => Action::NavigateBack,
        ("Right", false) => Action::NavigateForward,
        (",", false) => Action::ToggleTabBar,
        ("q", false) => Action::Quit,
        (digit, false) => {
            let n = digit.parse::<u32>().ok().filter(|n| (1..=9).contains(n))?;
            Action::SwitchToTab(n)
        }
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> Modifiers {
        Modifiers {
            primary: true,
            ..Default::default()
        }
    }

    fn primary_shift() -> Modifiers {
        Modifiers {
            primary: true,
            shift: true,
            alt: false,
        }
    }

    #[test]
    fn overlay_chords() {
        assert_eq!(action_for("p", primary()), Some(Action::ToggleCommandPalette));
        assert_eq!(action_for("P", primary()), Some(Action::ToggleCommandPalette));
        assert_eq!(action_for("/", primary()), Some(Action::ToggleQuickList));
        assert_eq!(action_for("?", primary_shift()), Some(Action::ToggleWorkspaceSwitcher));
        assert_eq!(action_for("u", primary()), Some(Action::AddToQuickList));
    }

    #[test]
    fn tab_chords() {
        assert_eq!(action_for("t", primary()), Some(Action::NewTab));
        assert_eq!(action_for("T", primary_shift()), Some(Action::ReopenClosedTab));
        assert_eq!(action_for("w", primary()), Some(Action::CloseTab));
        assert_eq!(action_for("ArrowLeft", primary()), Some(Action::NavigateBack));
        assert_eq!(action_for("Right", primary()), Some(Action::NavigateForward));
        assert_eq!(action_for(",", primary()), Some(Action::ToggleTabBar));
    }

    #[test]
    fn digits_switch_tabs() {
        assert_eq!(action_for("1", primary()), Some(Action::SwitchToTab(1)));
        assert_eq!(action_for("9", primary()), Some(Action::SwitchToTab(9)));
        assert_eq!(action_for("0", primary()), None);
    }

    #[test]
    fn plain_keys_are_ignored_except_escape() {
        assert_eq!(action_for("p", Modifiers::default()), None);
        assert_eq!(action_for("Escape", Modifiers::default()), Some(Action::CloseOverlay));
        assert_eq!(action_for("Esc", Modifiers::default()), Some(Action::CloseOverlay));
    }

    #[test]
    fn unbound_chords() {
        assert_eq!(action_for("x", primary()), None);
        assert_eq!(action_for("w", primary_shift()), None);
    }
}
