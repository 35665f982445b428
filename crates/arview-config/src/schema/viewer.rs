//! Settings forwarded to the PDF viewer page.

use serde::{Deserialize, Serialize};

/// Initial zoom mode for newly opened documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    #[default]
    Auto,
    Width,
    Height,
}

/// PDF viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfViewerConfig {
    pub default_fit: FitMode,
    /// Base panning speed in pixels per frame.
    pub pan_speed: f64,
    /// Multiplier applied while the fast-pan modifier is held.
    pub pan_speed_modifier: f64,
    /// Pan animation smoothing (valid range: 0.0-1.0).
    pub pan_smoothing: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_intensity: f64,
    /// A key held longer than this is treated as stuck.
    pub max_key_hold_time_ms: u32,
}

impl Default for PdfViewerConfig {
    fn default() -> Self {
        Self {
            default_fit: FitMode::Auto,
            pan_speed: 3.5,
            pan_speed_modifier: 2.5,
            pan_smoothing: 0.15,
            min_zoom: 0.1,
            max_zoom: 6.0,
            zoom_intensity: 0.018,
            max_key_hold_time_ms: 3000,
        }
    }
}
