//! [`StateStore`] backed by a single JSON document on disk.
//!
//! Every mutation rewrites the whole file atomically (`.tmp`, then rename).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use arview_common::{PlatformError, StateStore};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::paths;

pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// or corrupt one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Map<String, Value>>(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), "state file is corrupt, starting empty: {e}");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!(path = %path.display(), "failed to read state file: {e}");
                Map::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Open the store at the platform state file.
    pub fn open_default() -> Result<Self, PlatformError> {
        Ok(Self::open(paths::state_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Map<String, Value>>, PlatformError> {
        self.entries
            .lock()
            .map_err(|e| PlatformError::StoreError(e.to_string()))
    }

    fn flush(&self, entries: &Map<String, Value>) -> Result<(), PlatformError> {
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| PlatformError::StoreError(format!("serialize: {e}")))?;
        write_atomic(&self.path, &text)
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PlatformError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn delete(&self, key: &str) -> Result<bool, PlatformError> {
        let mut entries = self.lock()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.flush(&entries)?;
        }
        Ok(removed)
    }

    fn keys(&self) -> Result<Vec<String>, PlatformError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// Write `contents` to `path` through a sibling `.tmp` file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PlatformError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| PlatformError::StoreError(format!("{}: {e}", parent.display())))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, contents)
        .map_err(|e| PlatformError::StoreError(format!("{}: {e}", tmp_path.display())))?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, contents)
            .map_err(|e2| PlatformError::StoreError(format!("{}: {e2}", path.display())))?;
    }

    debug!(path = %path.display(), "state written to disk");
    Ok(())
}
