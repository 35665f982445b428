//! Write config files to disk.
//!
//! Writes are atomic (`.tmp` file, then rename) so a crash mid-write never
//! leaves a truncated `config.toml` behind.

use std::path::Path;

use arview_common::ConfigError;


/// Overwrite `path` with the commented template.
pub fn reset_config_to_path(path: &Path) -> Result<(), ConfigError> {
    write_atomic(path, crate::toml_loader::template_text())
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, contents).map_err(|e2| {
            ConfigError::ParseError(format!("failed to write config to {}: {e2}", path.display()))
        })?;
    }

    tracing::debug!(path = %path.display(), "config written to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml_loader::load_from_path;
    use tempfile::TempDir;

    #[test]
    fn reset_creates_missing_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        reset_config_to_path(&path).unwrap();
        assert!(load_from_path(&path).is_ok());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn reset_replaces_user_edits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[tabs]\nshow = true\n").unwrap();

        reset_config_to_path(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# arview configuration"));
        assert!(!load_from_path(&path).unwrap().tabs.show);
    }
}
