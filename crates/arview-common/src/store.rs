//! Key-value persistence seam shared by sessions, workspaces and the quick list.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::PlatformError;

/// A generic persisted object store keyed by strings.
///
/// Implementations must be cheap to read; callers treat every error as
/// "no saved state" and keep going.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError>;
    fn set(&self, key: &str, value: Value) -> Result<(), PlatformError>;
    fn delete(&self, key: &str) -> Result<bool, PlatformError>;
    fn keys(&self) -> Result<Vec<String>, PlatformError>;
}

/// Typed helpers over any [`StateStore`].
pub trait StateStoreExt: StateStore {
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PlatformError> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| PlatformError::StoreError(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PlatformError> {
        let value = serde_json::to_value(value)
            .map_err(|e| PlatformError::StoreError(format!("{key}: {e}")))?;
        self.set(key, value)
    }
}

impl<S: StateStore + ?Sized> StateStoreExt for S {}

/// In-memory store. Used in tests and when the on-disk store is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PlatformError::StoreError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PlatformError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PlatformError::StoreError(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, PlatformError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PlatformError::StoreError(e.to_string()))?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, PlatformError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PlatformError::StoreError(e.to_string()))?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_store_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("a", json!({"x": 1})).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!({"x": 1})));
        assert_eq!(store.keys().unwrap(), vec!["a".to_string()]);

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
    }

    #[test]
    fn typed_helpers() {
        let store = MemoryStore::new();
        let record = Record {
            name: "paper".into(),
            count: 3,
        };
        store.set_as("rec", &record).unwrap();
        let back: Option<Record> = store.get_as("rec").unwrap();
        assert_eq!(back, Some(record));
    }

    #[test]
    fn typed_get_reports_shape_mismatch() {
        let store = MemoryStore::new();
        store.set("rec", json!("not a record")).unwrap();
        let result: Result<Option<Record>, _> = store.get_as("rec");
        assert!(matches!(result, Err(PlatformError::StoreError(_))));
    }
}
