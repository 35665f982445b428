//! Appearance and tab bar validation.

use crate::schema::ArviewConfig;

use super::helpers::{validate_hex, validate_range, validate_range_f64};

pub(crate) fn validate_appearance(errors: &mut Vec<String>, config: &ArviewConfig) {
    let a = &config.appearance;
    validate_hex(errors, "appearance.background", &a.background);
    validate_range(errors, "appearance.page_gap", a.page_gap, 0, 100);
    validate_range(errors, "appearance.page_radius", a.page_radius, 0, 50);
    validate_range_f64(errors, "appearance.width_percent", a.width_percent, 0.1, 1.0);
    validate_range(errors, "appearance.overlay_height", a.overlay_height, 200, 2000);

    for (side, value) in [
        ("top", a.margins.top),
        ("right", a.margins.right),
        ("bottom", a.margins.bottom),
        ("left", a.margins.left),
    ] {
        validate_range_f64(errors, &format!("appearance.margins.{side}"), value, 0.0, 100.0);
    }

    let c = &a.colors;
    validate_hex(errors, "appearance.colors.accent", &c.accent);
    validate_hex(errors, "appearance.colors.muted", &c.muted);
    validate_hex(errors, "appearance.colors.button_hover", &c.button_hover);
    validate_hex(errors, "appearance.colors.text", &c.text);
    validate_hex(errors, "appearance.colors.muted_text", &c.muted_text);
}

pub(crate) fn validate_tabs(errors: &mut Vec<String>, config: &ArviewConfig) {
    validate_range(errors, "tabs.height", config.tabs.height, 16, 128);
    for (name, value) in config.tabs.colors() {
        validate_hex(errors, name, value);
    }
}
