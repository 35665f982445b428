//! Configuration schema types for arview.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod appearance;
mod keyboard;
mod palette;
mod session;
mod system;
mod tabs;
mod viewer;

pub use appearance::*;
pub use keyboard::*;
pub use palette::*;
pub use session::*;
pub use system::*;
pub use tabs::*;
pub use viewer::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for arview.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArviewConfig {
    pub appearance: AppearanceConfig,
    pub pdf_viewer: PdfViewerConfig,
    pub keyboard: KeyboardConfig,
    pub tabs: TabsConfig,
    pub file_watching: FileWatchingConfig,
    pub session: SessionConfig,
    pub command_palette: CommandPaletteConfig,
    pub logging: LoggingConfig,
}

impl ArviewConfig {
    /// Looks up a dotted path such as `"appearance.margins.top"`.
    ///
    /// Returns `None` when any segment is missing or the config cannot be
    /// represented as TOML.
    pub fn lookup(&self, path: &str) -> Option<toml::Value> {
        let root = toml::Value::try_from(self).ok()?;
        if path.is_empty() {
            return Some(root);
        }
        path.split('.')
            .try_fold(root, |value, key| match value {
                toml::Value::Table(mut table) => table.remove(key),
                _ => None,
            })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_appearance() {
        let config = ArviewConfig::default();
        assert_eq!(config.appearance.background, "#181616");
        assert_eq!(config.appearance.page_gap, 16);
        assert_eq!(config.appearance.page_radius, 8);
        assert!((config.appearance.width_percent - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.appearance.overlay_height, 500);
        assert_eq!(config.appearance.colors.accent, "#8ab4ff");
    }

    #[test]
    fn default_pdf_viewer() {
        let config = ArviewConfig::default();
        assert_eq!(config.pdf_viewer.default_fit, FitMode::Auto);
        assert!((config.pdf_viewer.max_zoom - 6.0).abs() < f64::EPSILON);
        assert_eq!(config.pdf_viewer.max_key_hold_time_ms, 3000);
    }

    #[test]
    fn default_session_and_watching() {
        let config = ArviewConfig::default();
        assert_eq!(config.session.max_closed_tabs, 30);
        assert!(config.session.auto_save);
        assert_eq!(config.file_watching.stability_threshold_ms, 300);
        assert_eq!(config.file_watching.poll_interval_ms, 100);
    }

    #[test]
    fn default_palette() {
        let config = ArviewConfig::default();
        assert_eq!(config.command_palette.width, 600);
        assert_eq!(config.command_palette.height, 60);
        assert_eq!(config.command_palette.top_offset, 120);
        assert_eq!(config.command_palette.quick_actions.switch_to_web, "s");
    }

    #[test]
    fn default_tabs_hidden() {
        let config = ArviewConfig::default();
        assert!(!config.tabs.show);
        assert_eq!(config.tabs.height, 32);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ArviewConfig = toml::from_str(
            r#"
[session]
max_closed_tabs = 5

[pdf_viewer]
default_fit = "width"
"#,
        )
        .unwrap();
        assert_eq!(config.session.max_closed_tabs, 5);
        assert!(config.session.auto_save);
        assert_eq!(config.pdf_viewer.default_fit, FitMode::Width);
        assert_eq!(config.appearance.overlay_height, 500);
    }

    #[test]
    fn lookup_dotted_paths() {
        let config = ArviewConfig::default();
        assert_eq!(
            config.lookup("appearance.margins.top"),
            Some(toml::Value::Float(16.0))
        );
        assert_eq!(
            config.lookup("session.max_closed_tabs"),
            Some(toml::Value::Integer(30))
        );
        assert_eq!(config.lookup("session.nope"), None);
        assert_eq!(config.lookup("session.max_closed_tabs.deeper"), None);
        assert!(config.lookup("").is_some());
    }

    #[test]
    fn serializes_to_toml() {
        let config = ArviewConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: ArviewConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.command_palette.default_search_engine, config.command_palette.default_search_engine);
    }
}
