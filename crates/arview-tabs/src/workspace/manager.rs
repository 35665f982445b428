//! Workspace bookkeeping over a [`StateStore`].

use std::path::Path;
use std::sync::Arc;

use arview_common::{StateStore, StateStoreExt, TabKind, WorkspaceId};
use tracing::{debug, info, warn};

use crate::errors::WorkspaceError;
use crate::session::SessionState;

use super::model::{Workspace, WorkspaceRecord, WorkspaceSummary};

/// Store key of the workspace record.
pub const WORKSPACES_KEY: &str = "workspaces";

pub struct WorkspaceManager {
    record: WorkspaceRecord,
    store: Arc<dyn StateStore>,
    /// Last handed-out access stamp; stamps strictly increase.
    last_stamp: i64,
}

impl WorkspaceManager {
    /// Load the record from `store`. Missing or unreadable state starts empty.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let mut record = match store.get_as::<WorkspaceRecord>(WORKSPACES_KEY) {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                warn!("failed to load workspaces: {e}");
                WorkspaceRecord::default()
            }
        };

        // Repair counters that fell behind the stored ids.
        let max_id = record.workspaces.keys().map(|id| id.0).max().unwrap_or(0);
        record.next_id = record.next_id.max(max_id + 1);
        if record
            .active_workspace_id
            .is_some_and(|id| !record.workspaces.contains_key(&id))
        {
            record.active_workspace_id = None;
        }

        let last_stamp = record
            .workspaces
            .values()
            .map(|w| w.last_accessed)
            .max()
            .unwrap_or(0);
        debug!(count = record.workspaces.len(), "workspaces loaded");
        Self {
            record,
            store,
            last_stamp,
        }
    }

    fn save(&self) {
        if let Err(e) = self.store.set_as(WORKSPACES_KEY, &self.record) {
            warn!("failed to save workspaces: {e}");
        }
    }

    fn stamp(&mut self) -> i64 {
        self.last_stamp = crate::now_millis().max(self.last_stamp + 1);
        self.last_stamp
    }

    pub fn record(&self) -> &WorkspaceRecord {
        &self.record
    }

    pub fn len(&self) -> usize {
        self.record.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.workspaces.is_empty()
    }

    pub fn get(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.record.workspaces.get(&id)
    }

    pub fn find_by_path(&self, path: &str) -> Option<WorkspaceId> {
        self.record
            .workspaces
            .values()
            .find(|w| w.file_path == path)
            .map(|w| w.id)
    }

    pub fn active_id(&self) -> Option<WorkspaceId> {
        self.record.active_workspace_id
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.active_id().and_then(|id| self.get(id))
    }

    /// Most recently accessed first.
    pub fn summaries(&self) -> Vec<WorkspaceSummary> {
        let mut list: Vec<WorkspaceSummary> =
            self.record.workspaces.values().map(Workspace::summary).collect();
        list.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed).then(a.id.cmp(&b.id)));
        list
    }

    /// Create a workspace anchored at `path` and make it active.
    pub fn create(&mut self, path: &Path, kind: TabKind, state: Option<SessionState>) -> WorkspaceId {
        let id = WorkspaceId(self.record.next_id);
        self.record.next_id += 1;
        let state = state.unwrap_or_default();
        let workspace = Workspace {
            id,
            file_path: path.display().to_string(),
            file_type: kind,
            display_name: None,
            tabs: state.tabs,
            active_tab_index: state.active_tab_index,
            last_accessed: self.stamp(),
        };
        info!(%id, path = %workspace.file_path, "workspace created");
        self.record.workspaces.insert(id, workspace);
        self.record.active_workspace_id = Some(id);
        self.save();
        id
    }

    /// Replace the saved tabs of `id`.
    pub fn update(&mut self, id: WorkspaceId, state: &SessionState) -> Result<(), WorkspaceError> {
        let stamp = self.stamp();
        let workspace = self
            .record
            .workspaces
            .get_mut(&id)
            .ok_or(WorkspaceError::NotFound(id))?;
        workspace.tabs = state.tabs.clone();
        workspace.active_tab_index = state.active_tab_index;
        workspace.last_accessed = stamp;
        self.save();
        Ok(())
    }

    /// Delete `id`. The last workspace cannot be deleted. When the active
    /// one goes, the lowest remaining id takes over.
    pub fn delete(&mut self, id: WorkspaceId) -> Result<(), WorkspaceError> {
        if !self.record.workspaces.contains_key(&id) {
            return Err(WorkspaceError::NotFound(id));
        }
        if self.record.workspaces.len() <= 1 {
            return Err(WorkspaceError::LastWorkspace);
        }
        self.record.workspaces.remove(&id);
        if self.record.active_workspace_id == Some(id) {
            self.record.active_workspace_id = self.record.workspaces.keys().next().copied();
        }
        info!(%id, "workspace deleted");
        self.save();
        Ok(())
    }

    /// Set or clear (empty name) the display name.
    pub fn rename(&mut self, id: WorkspaceId, name: &str) -> Result<(), WorkspaceError> {
        let workspace = self
            .record
            .workspaces
            .get_mut(&id)
            .ok_or(WorkspaceError::NotFound(id))?;
        let name = name.trim();
        workspace.display_name = (!name.is_empty()).then(|| name.to_string());
        self.save();
        Ok(())
    }

    pub fn activate(&mut self, id: WorkspaceId) -> Result<(), WorkspaceError> {
        let stamp = self.stamp();
        let workspace = self
            .record
            .workspaces
            .get_mut(&id)
            .ok_or(WorkspaceError::NotFound(id))?;
        workspace.last_accessed = stamp;
        self.record.active_workspace_id = Some(id);
        self.save();
        Ok(())
    }
}
