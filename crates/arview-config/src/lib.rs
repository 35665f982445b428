//! arview configuration system.
//!
//! TOML-based configuration with live reload and full validation. Every
//! section has defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arview_config::{load_config, config_to_json};
//!
//! let config = load_config().unwrap_or_default();
//! println!("{}", config_to_json(&config));
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{ArviewConfig, CONFIG_SCHEMA_VERSION};
pub use toml_writer::reset_config_to_path;
pub use watcher::ConfigWatcher;

use arview_common::ConfigError;
use std::path::Path;

/// Load and validate config from the platform default path, creating the
/// commented template on first run.
pub fn load_config() -> Result<ArviewConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path (the `--config` flag).
pub fn load_config_from(path: &Path) -> Result<ArviewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ArviewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
