//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&ArviewConfig::default()).is_ok());
}

#[test]
fn catches_bad_background_color() {
    let mut config = ArviewConfig::default();
    config.appearance.background = "red".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("appearance.background"));
}

#[test]
fn short_hex_is_rejected() {
    assert!(is_hex_color("#a1B2c3"));
    assert!(!is_hex_color("#fff"));
    assert!(!is_hex_color("#ffffff00"));
    assert!(!is_hex_color("ffffff"));
}

#[test]
fn catches_margin_out_of_range() {
    let mut config = ArviewConfig::default();
    config.appearance.margins.left = 150.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("appearance.margins.left"));
}

#[test]
fn catches_width_percent_too_small() {
    let mut config = ArviewConfig::default();
    config.appearance.width_percent = 0.05;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("appearance.width_percent"));
}

#[test]
fn catches_inverted_zoom_bounds() {
    let mut config = ArviewConfig::default();
    config.pdf_viewer.min_zoom = 8.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("pdf_viewer.min_zoom"));
}

#[test]
fn catches_stability_threshold_out_of_range() {
    let mut config = ArviewConfig::default();
    config.file_watching.stability_threshold_ms = 50;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("file_watching.stability_threshold_ms"));
}

#[test]
fn catches_zero_closed_tab_capacity() {
    let mut config = ArviewConfig::default();
    config.session.max_closed_tabs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.max_closed_tabs"));
}

#[test]
fn catches_non_http_search_engine() {
    let mut config = ArviewConfig::default();
    config.command_palette.default_search_engine = "ftp://search/%s".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("default_search_engine"));
}

#[test]
fn catches_bad_tab_color() {
    let mut config = ArviewConfig::default();
    config.tabs.separator_color = "#12".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("tabs.separator_color"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = ArviewConfig::default();
    config.tabs.height = 4;
    config.command_palette.width = 50;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("tabs.height"));
    assert!(err.contains("command_palette.width"));
    assert!(err.contains("; "));
}
