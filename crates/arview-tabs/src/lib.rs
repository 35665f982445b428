//! Tabs, navigation history, session snapshots and per-file workspaces.
//!
//! Everything here is independent of the windowing layer: native content
//! surfaces are driven through the [`SurfaceHost`] trait, which the app
//! implements on top of its webview registry.

pub mod closed;
pub mod errors;
pub mod history;
pub mod layout;
pub mod manager;
pub mod quicklist;
pub mod session;
pub mod surface;
pub mod tab;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use closed::ClosedTabRing;
pub use errors::{TabError, WorkspaceError};
pub use history::NavigationHistory;
pub use manager::{TabEvent, TabManager, TabSummary};
pub use quicklist::{QuickList, QuickListItem, QuickListStore};
pub use session::{SessionState, SessionStore, TabSnapshot};
pub use surface::{SurfaceContent, SurfaceHost};
pub use tab::Tab;
pub use workspace::{OpenOutcome, Workspace, WorkspaceCoordinator, WorkspaceManager, WorkspaceSummary};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
