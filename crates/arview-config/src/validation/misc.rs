//! Validation for the smaller sections: viewer, file watching, session
//! and the command palette.

use crate::schema::ArviewConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_pdf_viewer(errors: &mut Vec<String>, config: &ArviewConfig) {
    let v = &config.pdf_viewer;
    validate_range_f64(errors, "pdf_viewer.pan_smoothing", v.pan_smoothing, 0.0, 1.0);
    if v.pan_speed <= 0.0 {
        errors.push(format!("pdf_viewer.pan_speed = {} must be positive", v.pan_speed));
    }
    if v.min_zoom <= 0.0 {
        errors.push(format!("pdf_viewer.min_zoom = {} must be positive", v.min_zoom));
    }
    if v.min_zoom >= v.max_zoom {
        errors.push(format!(
            "pdf_viewer.min_zoom ({}) must be less than pdf_viewer.max_zoom ({})",
            v.min_zoom, v.max_zoom
        ));
    }
}

pub(crate) fn validate_file_watching(errors: &mut Vec<String>, config: &ArviewConfig) {
    validate_range(
        errors,
        "file_watching.stability_threshold_ms",
        config.file_watching.stability_threshold_ms,
        100,
        5000,
    );
    validate_range(
        errors,
        "file_watching.poll_interval_ms",
        config.file_watching.poll_interval_ms,
        50,
        1000,
    );
}

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ArviewConfig) {
    validate_range(
        errors,
        "session.max_closed_tabs",
        config.session.max_closed_tabs,
        1,
        100,
    );
}

pub(crate) fn validate_command_palette(errors: &mut Vec<String>, config: &ArviewConfig) {
    let p = &config.command_palette;
    validate_range(errors, "command_palette.width", p.width, 200, 1200);
    validate_range(errors, "command_palette.height", p.height, 40, 200);
    validate_range(errors, "command_palette.top_offset", p.top_offset, 0, 500);

    let engine = &p.default_search_engine;
    if !(engine.starts_with("http://") || engine.starts_with("https://")) {
        errors.push(format!(
            "command_palette.default_search_engine = {engine:?} must start with http:// or https://"
        ));
    }

    let q = &p.quick_actions;
    for (name, trigger) in [
        ("switch_to_web", &q.switch_to_web),
        ("switch_to_pdf", &q.switch_to_pdf),
        ("go_back", &q.go_back),
        ("go_forward", &q.go_forward),
    ] {
        if trigger.trim().is_empty() {
            errors.push(format!("command_palette.quick_actions.{name} must not be empty"));
        }
    }
}
