use super::Action;

impl Action {
    /// Human-readable label for display in the command palette.
    pub fn label(&self) -> &'static str {
        match self {
            Action::NewTab => "New Tab",
            Action::CloseTab => "Close Tab",
            Action::ReopenClosedTab => "Reopen Closed Tab",
            Action::ReloadTab => "Reload Tab",
            Action::NavigateBack => "Back",
            Action::NavigateForward => "Forward",
            Action::SwitchToTab(1) => "Go to Tab 1",
            Action::SwitchToTab(2) => "Go to Tab 2",
            Action::SwitchToTab(3) => "Go to Tab 3",
            Action::SwitchToTab(4) => "Go to Tab 4",
            Action::SwitchToTab(5) => "Go to Tab 5",
            Action::SwitchToTab(6) => "Go to Tab 6",
            Action::SwitchToTab(7) => "Go to Tab 7",
            Action::SwitchToTab(8) => "Go to Tab 8",
            Action::SwitchToTab(9) => "Go to Tab 9",
            Action::SwitchToTab(_) => "Go to Tab",
            Action::SwitchToWebTab => "Switch to Web",
            Action::SwitchToDocumentTab => "Switch to Document",
            Action::ToggleTabBar => "Toggle Tab Bar",
            Action::OpenFile(_) => "Open File",
            Action::OpenUrl(_) => "Open URL",
            Action::ToggleCommandPalette => "Command Palette",
            Action::ToggleQuickList => "Quick List",
            Action::AddToQuickList => "Add to Quick List",
            Action::ToggleWorkspaceSwitcher => "Workspaces",
            Action::ToggleChat => "AI Chat",
            Action::CloseOverlay => "Close Overlay",
            Action::ReloadConfig => "Reload Config",
            Action::Quit => "Quit",
            Action::None => "None",
        }
    }

    /// All actions that should appear in the command palette.
    pub fn palette_actions() -> Vec<Action> {
        vec![
            Action::NewTab,
            Action::CloseTab,
            Action::ReopenClosedTab,
            Action::ReloadTab,
            Action::NavigateBack,
            Action::NavigateForward,
            Action::SwitchToWebTab,
            Action::SwitchToDocumentTab,
            Action::ToggleTabBar,
            Action::ToggleQuickList,
            Action::AddToQuickList,
            Action::ToggleWorkspaceSwitcher,
            Action::ToggleChat,
            Action::ReloadConfig,
            Action::Quit,
        ]
    }

    /// Resolves a palette `:command` (without the colon).
    pub fn from_internal_command(command: &str) -> Option<Action> {
        match command.trim() {
            "reload-config" | "reload" => Some(Action::ReloadConfig),
            "workspaces" | "ws" => Some(Action::ToggleWorkspaceSwitcher),
            "quicklist" | "ql" => Some(Action::ToggleQuickList),
            "chat" | "ai" => Some(Action::ToggleChat),
            "tabbar" => Some(Action::ToggleTabBar),
            "reopen" => Some(Action::ReopenClosedTab),
            "close" => Some(Action::CloseTab),
            "quit" | "q" => Some(Action::Quit),
            _ => None,
        }
    }
}
