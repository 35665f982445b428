use std::path::PathBuf;

use arview_common::PlatformError;

pub(super) const APP_NAME: &str = "arview";

/// Returns the platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/arview`
/// - Linux: `$XDG_CONFIG_HOME/arview` (defaults to `~/.config/arview`)
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/arview`
/// - Linux: `$XDG_DATA_HOME/arview` (defaults to `~/.local/share/arview`)
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific cache directory (webview profile data).
pub fn cache_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// `config_dir()/config.toml`
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// `data_dir()/state.json`: sessions, workspaces and quick lists.
pub fn state_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("state.json"))
}

/// `data_dir()/ai_chat_config.json`
pub fn ai_settings_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("ai_chat_config.json"))
}

/// `data_dir()/logs`
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

/// Per-user runtime directory, falling back to the temp dir where the
/// platform has none.
pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir().unwrap_or_else(std::env::temp_dir)
}

/// Socket the primary instance listens on for forwarded targets.
pub fn instance_socket() -> PathBuf {
    runtime_dir().join(format!("{APP_NAME}.sock"))
}
