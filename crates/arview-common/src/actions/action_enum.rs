use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every user-triggerable action in the application.
///
/// Key chords, the command palette, overlay IPC and forwarded launches
/// all resolve to an `Action`. The app dispatcher matches on this enum
/// to route to the tab, workspace and overlay subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Tabs --
    NewTab,
    CloseTab,
    ReopenClosedTab,
    ReloadTab,
    NavigateBack,
    NavigateForward,
    SwitchToTab(u32),
    SwitchToWebTab,
    SwitchToDocumentTab,
    ToggleTabBar,

    // -- Content --
    OpenFile(PathBuf),
    OpenUrl(String),

    // -- Overlays --
    ToggleCommandPalette,
    ToggleQuickList,
    AddToQuickList,
    ToggleWorkspaceSwitcher,
    ToggleChat,
    CloseOverlay,

    // -- App --
    ReloadConfig,
    Quit,

    // -- Noop --
    None,
}
