use std::collections::BTreeMap;
use std::path::Path;

use arview_common::{TabKind, WorkspaceId};
use serde::{Deserialize, Serialize};

use crate::session::{SessionState, TabSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub file_path: String,
    pub file_type: TabKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub tabs: Vec<TabSnapshot>,
    #[serde(default)]
    pub active_tab_index: usize,
    #[serde(default)]
    pub last_accessed: i64,
}

impl Workspace {
    /// The display name, or the anchor's basename.
    pub fn name(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        Path::new(&self.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.clone())
    }

    /// Saved tabs as a session to replay.
    pub fn session(&self) -> SessionState {
        SessionState {
            tabs: self.tabs.clone(),
            active_tab_index: self.active_tab_index,
            last_saved: self.last_accessed,
        }
    }

    pub fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            id: self.id,
            file_path: self.file_path.clone(),
            file_type: self.file_type,
            display_name: self.name(),
            tab_count: self.tabs.len(),
            last_accessed: self.last_accessed,
        }
    }
}

/// Row of the workspace switcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub id: WorkspaceId,
    pub file_path: String,
    pub file_type: TabKind,
    pub display_name: String,
    pub tab_count: usize,
    pub last_accessed: i64,
}

/// Persisted form of every workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceRecord {
    pub workspaces: BTreeMap<WorkspaceId, Workspace>,
    pub active_workspace_id: Option<WorkspaceId>,
    pub next_id: u64,
}

impl Default for WorkspaceRecord {
    fn default() -> Self {
        Self {
            workspaces: BTreeMap::new(),
            active_workspace_id: None,
            next_id: 1,
        }
    }
}
