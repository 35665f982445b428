//! Per-file workspaces: one persisted tab session per anchor document.

mod coordinator;
mod manager;
mod model;

pub use coordinator::{OpenOutcome, WorkspaceCoordinator};
pub use manager::{WorkspaceManager, WORKSPACES_KEY};
pub use model::{Workspace, WorkspaceRecord, WorkspaceSummary};

#[cfg(test)]
mod tests;
