//! Per-context saved links shown in the quick list overlay.

use std::sync::Arc;

use arview_common::{new_id, StateStore, StateStoreExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::GENERAL_CONTEXT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickListItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub created_at: i64,
    #[serde(default)]
    pub folder_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickListFolder {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickList {
    pub items: Vec<QuickListItem>,
    pub folders: Vec<QuickListFolder>,
    pub last_modified: i64,
}

impl QuickList {
    fn touch(&mut self) {
        self.last_modified = crate::now_millis();
    }

    /// Add a link. An empty title falls back to the URL.
    pub fn add(&mut self, url: &str, title: &str) -> &QuickListItem {
        let title = if title.trim().is_empty() { url } else { title };
        self.items.push(QuickListItem {
            id: new_id(),
            url: url.to_string(),
            title: title.to_string(),
            created_at: crate::now_millis(),
            folder_id: None,
        });
        self.touch();
        &self.items[self.items.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&QuickListItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Remove an item and hand it back.
    pub fn delete(&mut self, id: &str) -> Option<QuickListItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        let item = self.items.remove(index);
        self.touch();
        Some(item)
    }

    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.title = title.to_string();
        self.touch();
        true
    }

    /// Move an item into `folder`, or back to the top level with `None`.
    /// Unknown folders are refused.
    pub fn move_to_folder(&mut self, id: &str, folder: Option<&str>) -> bool {
        if let Some(folder) = folder {
            if !self.folders.iter().any(|f| f.id == folder) {
                return false;
            }
        }
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.folder_id = folder.map(str::to_string);
        self.touch();
        true
    }

    pub fn add_folder(&mut self, name: &str) -> String {
        let id = new_id();
        self.folders.push(QuickListFolder {
            id: id.clone(),
            name: name.trim().to_string(),
            created_at: crate::now_millis(),
        });
        self.touch();
        id
    }

    /// Remove a folder. Its items move to the top level.
    pub fn remove_folder(&mut self, id: &str) -> bool {
        let before = self.folders.len();
        self.folders.retain(|f| f.id != id);
        if self.folders.len() == before {
            return false;
        }
        for item in &mut self.items {
            if item.folder_id.as_deref() == Some(id) {
                item.folder_id = None;
            }
        }
        self.touch();
        true
    }
}

/// Loads and saves quick lists keyed by context.
#[derive(Clone)]
pub struct QuickListStore {
    store: Arc<dyn StateStore>,
}

impl QuickListStore {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub fn store_key(context: &str) -> String {
        format!("quicklist_{context}")
    }

    /// Context for a quick list: the first pdf target, else general.
    pub fn context_for(first_pdf: Option<&str>) -> String {
        first_pdf.unwrap_or(GENERAL_CONTEXT).to_string()
    }

    pub fn load(&self, context: &str) -> QuickList {
        let key = Self::store_key(context);
        match self.store.get_as::<QuickList>(&key) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                warn!(key, "failed to load quick list: {e}");
                QuickList::default()
            }
        }
    }

    pub fn save(&self, context: &str, list: &QuickList) {
        let key = Self::store_key(context);
        match self.store.set_as(&key, list) {
            Ok(()) => debug!(key, items = list.items.len(), "quick list saved"),
            Err(e) => warn!(key, "failed to save quick list: {e}"),
        }
    }
}
