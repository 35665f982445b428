//! Window background, inset margins, overlay sizing and the UI palette.

use arview_common::Margins;
use serde::{Deserialize, Serialize};

/// Appearance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Window background color (hex).
    pub background: String,
    /// Gap between rendered PDF pages in pixels (valid range: 0-100).
    pub page_gap: u32,
    /// Corner radius of rendered PDF pages in pixels (valid range: 0-50).
    pub page_radius: u32,
    /// Space reserved around the inset view (each side 0-100).
    pub margins: Margins,
    /// Overlay width as a fraction of the window (valid range: 0.1-1.0).
    pub width_percent: f64,
    /// Height of the quick list and workspace switcher (valid range: 200-2000).
    pub overlay_height: u32,
    pub colors: UiColors,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background: "#181616".into(),
            page_gap: 16,
            page_radius: 8,
            margins: Margins {
                top: 16.0,
                right: 0.0,
                bottom: 8.0,
                left: 0.0,
            },
            width_percent: 0.95,
            overlay_height: 500,
            colors: UiColors::default(),
        }
    }
}

/// Colors shared by every overlay page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiColors {
    pub accent: String,
    pub muted: String,
    pub button_hover: String,
    pub text: String,
    pub muted_text: String,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            accent: "#8ab4ff".into(),
            muted: "#3a3939".into(),
            button_hover: "#98bb6c".into(),
            text: "#e6e1dc".into(),
            muted_text: "#9e9a96".into(),
        }
    }
}
