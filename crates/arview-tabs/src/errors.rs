use std::path::PathBuf;

use arview_common::{TabId, WorkspaceId};

#[derive(Debug, thiserror::Error)]
pub enum TabError {
    #[error("surface error: {0}")]
    Surface(String),

    #[error("unknown tab: {0}")]
    UnknownTab(TabId),

    #[error("not a document: {}", .0.display())]
    NotADocument(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("cannot delete the last workspace")]
    LastWorkspace,

    #[error("unknown workspace: {0}")]
    NotFound(WorkspaceId),

    #[error(transparent)]
    Tab(#[from] TabError),
}

impl From<WorkspaceError> for arview_common::ArviewError {
    fn from(e: WorkspaceError) -> Self {
        arview_common::ArviewError::Workspace(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            WorkspaceError::LastWorkspace.to_string(),
            "cannot delete the last workspace"
        );
        assert_eq!(TabError::UnknownTab(TabId(4)).to_string(), "unknown tab: tab-4");
        assert_eq!(
            TabError::NotADocument(PathBuf::from("/a.txt")).to_string(),
            "not a document: /a.txt"
        );
    }

    #[test]
    fn converts_to_app_error() {
        let err: arview_common::ArviewError = WorkspaceError::NotFound(WorkspaceId(9)).into();
        assert_eq!(err.to_string(), "workspace error: unknown workspace: 9");
    }
}
