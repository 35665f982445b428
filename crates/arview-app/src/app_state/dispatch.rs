//! Action dispatch: routes resolved actions to tabs, workspaces and overlays.

use std::path::{Path, PathBuf};

use arview_common::{Action, Event, TabKind};
use arview_config::ArviewConfig;
use arview_tabs::OpenOutcome;
use arview_webview::ViewId;

use crate::cli::{LaunchTarget, DEFAULT_URL};

use super::core::ArviewApp;
use super::overlays::{BACKDROP, CHAT, PALETTE, SWITCHER, TABBAR};

impl ArviewApp {
    /// Dispatch a resolved [`Action`] to the appropriate subsystem.
    pub(super) fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::NewTab => self.show_overlay(PALETTE),
            Action::CloseTab => {
                self.with_host(|c, host| c.tabs_mut().close_active(host));
            }
            Action::ReopenClosedTab => {
                if let Err(e) = self.with_host(|c, host| c.tabs_mut().reopen_closed_tab(host)) {
                    tracing::warn!("reopen failed: {e}");
                }
            }
            Action::ReloadTab => {
                self.with_host(|c, host| c.tabs_mut().reload_active(host));
            }
            Action::NavigateBack => {
                self.with_host(|c, host| c.tabs_mut().navigate_back(host));
            }
            Action::NavigateForward => {
                self.with_host(|c, host| c.tabs_mut().navigate_forward(host));
            }
            Action::SwitchToTab(n) => {
                self.with_host(|c, host| c.tabs_mut().switch_to_tab_by_index(n as usize, host));
            }
            Action::SwitchToWebTab => {
                let switched = self.with_host(|c, host| {
                    let tabs = c.tabs_mut();
                    tabs.last_web_tab().is_some_and(|id| tabs.switch_to_tab(id, host))
                });
                if !switched {
                    self.open_url(DEFAULT_URL);
                }
            }
            Action::SwitchToDocumentTab => {
                self.with_host(|c, host| {
                    let tabs = c.tabs_mut();
                    tabs.first_document_tab().is_some_and(|id| tabs.switch_to_tab(id, host))
                });
            }
            Action::ToggleTabBar => self.toggle_tab_bar(),
            Action::OpenFile(path) => self.open_file(&path),
            Action::OpenUrl(url) => self.open_url(&url),
            Action::ToggleCommandPalette => self.toggle_overlay(PALETTE),
            Action::ToggleQuickList => self.toggle_quicklist(),
            Action::AddToQuickList => self.add_current_to_quicklist(),
            Action::ToggleWorkspaceSwitcher => self.toggle_overlay(SWITCHER),
            Action::ToggleChat => self.toggle_overlay(CHAT),
            Action::CloseOverlay => self.close_top_overlay(),
            Action::ReloadConfig => match arview_config::load_config_from(&self.config_path) {
                Ok(config) => self.apply_config(config),
                Err(e) => tracing::warn!(path = %self.config_path.display(), "config reload failed: {e}"),
            },
            Action::Quit => {
                tracing::info!("quit requested");
                self.should_exit = true;
            }
            Action::None => {}
        }
    }

    /// Open a document as the active workspace. Reopening the active one
    /// only focuses the window.
    pub(super) fn open_file(&mut self, path: &Path) {
        match self.with_host(|c, host| c.open_file(path, host)) {
            Ok(OpenOutcome::AlreadyActive(_)) => self.focus_window(),
            Ok(OpenOutcome::Opened(id)) => {
                self.event_bus.publish(Event::WorkspaceSwitched(id));
                self.retarget_watcher();
            }
            Err(e) => tracing::warn!(path = %path.display(), "failed to open file: {e}"),
        }
    }

    fn focus_window(&self) {
        if let Some(window) = &self.window {
            window.focus_window();
        }
    }

    pub(super) fn open_url(&mut self, url: &str) {
        if let Err(e) = self.with_host(|c, host| c.open_url(url, host)) {
            tracing::warn!(url, "failed to open url: {e}");
        }
    }

    pub(super) fn open_launch_target(&mut self, target: LaunchTarget) {
        match target {
            LaunchTarget::Document(path) => self.open_file(&path),
            LaunchTarget::Url(url) => self.open_url(&url),
        }
    }

    /// A target forwarded by a second launch.
    pub(super) fn open_target(&mut self, line: &str) {
        let line = line.trim();
        match TabKind::for_target(line) {
            Some(TabKind::Web) => self.dispatch(Action::OpenUrl(line.to_string())),
            Some(_) => self.dispatch(Action::OpenFile(PathBuf::from(line))),
            None => {
                tracing::warn!(target_line = line, "ignoring forwarded target");
                return;
            }
        }
        self.focus_window();
    }

    /// Swap in a reloaded config and push it to every surface.
    pub(super) fn apply_config(&mut self, config: ArviewConfig) {
        self.config = config;
        let margins = self.effective_margins();
        let tab_bar = if self.overlays.is_visible(TABBAR) {
            f64::from(self.config.tabs.height)
        } else {
            0.0
        };
        let capacity = self.config.session.max_closed_tabs as usize;
        let auto_save = self.config.session.auto_save;
        self.with_host(|c, host| {
            let tabs = c.tabs_mut();
            tabs.set_margins(margins, host);
            tabs.set_tab_bar_height(tab_bar, host);
            tabs.set_closed_capacity(capacity);
            c.set_auto_save(auto_save);
        });
        self.sync_webview_bounds();

        let theme = self.theme_payload();
        let viewer = self.viewer_config_payload();
        let views = self.webviews.as_ref().map(|r| r.views()).unwrap_or_default();
        for view in views {
            if view == ViewId::Overlay(BACKDROP) || !self.mailbox.is_loaded(view) {
                continue;
            }
            self.send_ipc(view, "theme", theme.clone());
            let is_document = view
                .tab()
                .and_then(|tab| self.coordinator.tabs().tab(tab))
                .is_some_and(|t| t.kind.is_document());
            if is_document {
                self.send_ipc(view, "viewer-config", viewer.clone());
            }
        }
        self.refresh_backdrop();
        self.retarget_watcher();
        self.event_bus.publish(Event::ConfigReloaded);
        tracing::info!("config applied");
    }
}
