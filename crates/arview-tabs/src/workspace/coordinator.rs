//! Mounting and unmounting workspaces into the tab manager.

use std::path::Path;

use arview_common::{TabId, TabKind, WorkspaceId};
use tracing::{debug, info, warn};

use crate::errors::{TabError, WorkspaceError};
use crate::manager::TabManager;
use crate::session::{context_key, SessionState, SessionStore};
use crate::surface::SurfaceHost;

use super::manager::WorkspaceManager;

/// What [`WorkspaceCoordinator::open_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A workspace was created or switched to.
    Opened(WorkspaceId),
    /// The file's workspace was already mounted; nothing changed.
    AlreadyActive(WorkspaceId),
}

impl OpenOutcome {
    pub fn id(self) -> WorkspaceId {
        match self {
            OpenOutcome::Opened(id) | OpenOutcome::AlreadyActive(id) => id,
        }
    }

    pub fn is_already_active(self) -> bool {
        matches!(self, OpenOutcome::AlreadyActive(_))
    }
}

/// Owns the mounted tabs together with the workspace they belong to.
///
/// Every switch persists the outgoing workspace, unmounts its tabs and only
/// then reads the incoming workspace's saved state.
pub struct WorkspaceCoordinator {
    tabs: TabManager,
    workspaces: WorkspaceManager,
    sessions: SessionStore,
    auto_save: bool,
}

impl WorkspaceCoordinator {
    pub fn new(tabs: TabManager, workspaces: WorkspaceManager, sessions: SessionStore) -> Self {
        Self {
            tabs,
            workspaces,
            sessions,
            auto_save: true,
        }
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Whether sessions are also written to the per-context session store.
    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    pub fn rename_workspace(&mut self, id: WorkspaceId, name: &str) -> Result<(), WorkspaceError> {
        self.workspaces.rename(id, name)
    }

    /// Open `path` as the active workspace.
    pub fn open_file(
        &mut self,
        path: &Path,
        host: &mut dyn SurfaceHost,
    ) -> Result<OpenOutcome, WorkspaceError> {
        let kind = TabKind::for_path(path)
            .filter(|k| k.is_document())
            .ok_or_else(|| TabError::NotADocument(path.to_path_buf()))?;
        let target = path.display().to_string();

        if let Some(id) = self.workspaces.find_by_path(&target) {
            if self.workspaces.active_id() == Some(id) {
                if self.tabs.find_document(&target).is_some() {
                    debug!(%id, "workspace already active");
                    return Ok(OpenOutcome::AlreadyActive(id));
                }
                self.ensure_anchor(path, host)?;
                self.persist_current();
                return Ok(OpenOutcome::Opened(id));
            }
            self.switch_workspace(id, host)?;
            return Ok(OpenOutcome::Opened(id));
        }

        self.persist_current();
        self.tabs.clear(host);

        let saved = self.sessions.load(&target);
        let id = self.workspaces.create(path, kind, saved.clone());
        info!(%id, path = %target, restored = saved.is_some(), "opening file");

        if let Some(state) = &saved {
            self.restore_session(state, host);
        }
        self.ensure_anchor(path, host)?;
        self.persist_current();
        Ok(OpenOutcome::Opened(id))
    }

    /// Open a URL as a web tab in the current context.
    pub fn open_url(&mut self, url: &str, host: &mut dyn SurfaceHost) -> Result<TabId, TabError> {
        self.tabs.create_web_tab(url, host)
    }

    /// Persist the current workspace, unmount it and mount `id`.
    pub fn switch_workspace(
        &mut self,
        id: WorkspaceId,
        host: &mut dyn SurfaceHost,
    ) -> Result<(), WorkspaceError> {
        if self.workspaces.get(id).is_none() {
            return Err(WorkspaceError::NotFound(id));
        }
        self.persist_current();
        self.tabs.clear(host);
        self.workspaces.activate(id)?;
        self.mount_active(host)
    }

    /// Delete `id`. When it was mounted, the newly active workspace is
    /// mounted in its place.
    pub fn delete_workspace(
        &mut self,
        id: WorkspaceId,
        host: &mut dyn SurfaceHost,
    ) -> Result<(), WorkspaceError> {
        let was_active = self.workspaces.active_id() == Some(id);
        self.workspaces.delete(id)?;
        if was_active {
            self.tabs.clear(host);
            self.mount_active(host)?;
        }
        Ok(())
    }

    fn mount_active(&mut self, host: &mut dyn SurfaceHost) -> Result<(), WorkspaceError> {
        let Some(workspace) = self.workspaces.active().cloned() else {
            return Ok(());
        };
        self.restore_session(&workspace.session(), host);
        if let Err(e) = self.ensure_anchor(Path::new(&workspace.file_path), host) {
            if self.tabs.is_empty() {
                return Err(e.into());
            }
            warn!(id = %workspace.id, "anchor unavailable, keeping restored tabs: {e}");
        }
        debug!(id = %workspace.id, tabs = self.tabs.len(), "workspace mounted");
        Ok(())
    }

    /// Mount the anchor document first in the order when the restored
    /// tabs lack it.
    fn ensure_anchor(&mut self, path: &Path, host: &mut dyn SurfaceHost) -> Result<(), TabError> {
        if self.tabs.find_document(&path.display().to_string()).is_some() {
            return Ok(());
        }
        warn!(path = %path.display(), "anchor tab missing after restore, reopening");
        let id = self.tabs.get_or_create_document_tab(path, host)?;
        self.tabs.move_to_front(id);
        Ok(())
    }

    /// Mount `state`'s tabs in order and activate the saved index, clamped
    /// into range. Returns how many tabs were mounted.
    pub fn restore_session(&mut self, state: &SessionState, host: &mut dyn SurfaceHost) -> usize {
        let mut mounted = 0;
        for snapshot in &state.tabs {
            match self.tabs.restore_snapshot(snapshot, host) {
                Ok(_) => mounted += 1,
                Err(e) => warn!(location = snapshot.target(), "failed to restore tab: {e}"),
            }
        }
        if !self.tabs.is_empty() {
            let index = state.active_tab_index.min(self.tabs.len() - 1);
            self.tabs.switch_to_tab_by_index(index + 1, host);
        }
        mounted
    }

    /// Save the mounted tabs into the active workspace and, with auto-save
    /// on, into the session store.
    pub fn persist_current(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let state = SessionState::capture(&self.tabs);
        if let Some(id) = self.workspaces.active_id() {
            if let Err(e) = self.workspaces.update(id, &state) {
                warn!(%id, "failed to persist workspace: {e}");
            }
        }
        if self.auto_save {
            self.sessions.save(&context_key(&state.tabs), &state);
        }
    }
}
