use std::fs;

use arview_common::PlatformError;

use super::resolve::{cache_dir, config_dir, data_dir, log_dir};

/// Creates the config, data, cache and log directories if missing.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [config_dir()?, data_dir()?, cache_dir()?, log_dir()?] {
        fs::create_dir_all(&dir)
            .map_err(|e| PlatformError::PathError(format!("{}: {e}", dir.display())))?;
    }
    Ok(())
}
