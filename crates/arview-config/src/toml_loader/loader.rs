//! Read `config.toml` from a path or from the platform default location.

use crate::schema::ArviewConfig;
use crate::validation;
use arview_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. Validation problems are logged
/// and the parsed config is returned unchanged; callers that need a strict
/// result run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<ArviewConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ArviewConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/arview/config.toml`
/// On Linux: `~/.config/arview/config.toml`
///
/// A commented template is written when the file does not exist yet.
pub fn load_default() -> Result<ArviewConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(ArviewConfig::default());
    }

    load_from_path(&path)
}
