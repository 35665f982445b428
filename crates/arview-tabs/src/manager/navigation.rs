//! History navigation, page events and reloads.

use arview_common::{TabId, TabKind};
use tracing::debug;

use crate::surface::{SurfaceContent, SurfaceHost};
use crate::tab::normalize_url;

use super::{TabEvent, TabManager};

impl TabManager {
    /// A web surface navigated on its own (link click, redirect).
    pub fn record_navigation(&mut self, id: TabId, url: &str) -> bool {
        match self.tabs.get_mut(&id) {
            Some(tab) if tab.kind == TabKind::Web => tab.history.push(url),
            _ => false,
        }
    }

    /// A surface reported a new page title.
    pub fn set_title(&mut self, id: TabId, title: &str) {
        if let Some(tab) = self.tabs.get_mut(&id) {
            if tab.title != title {
                tab.title = title.to_string();
                self.events.push(TabEvent::TitleChanged(id, title.to_string()));
            }
        }
    }

    /// Load `url` into an existing web tab and activate it.
    pub fn navigate_tab(&mut self, id: TabId, url: &str, host: &mut dyn SurfaceHost) -> bool {
        let url = normalize_url(url);
        match self.tabs.get_mut(&id) {
            Some(tab) if tab.kind == TabKind::Web => {
                tab.history.push(url.clone());
                host.load(id, &SurfaceContent::new(TabKind::Web, url));
            }
            _ => return false,
        }
        self.switch_to_tab(id, host)
    }

    pub fn navigate_back(&mut self, host: &mut dyn SurfaceHost) -> bool {
        self.step_history(host, true)
    }

    pub fn navigate_forward(&mut self, host: &mut dyn SurfaceHost) -> bool {
        self.step_history(host, false)
    }

    fn step_history(&mut self, host: &mut dyn SurfaceHost, back: bool) -> bool {
        let Some(id) = self.active else {
            return false;
        };
        let Some(tab) = self.tabs.get_mut(&id) else {
            return false;
        };
        let moved = if back {
            tab.history.back().is_some()
        } else {
            tab.history.forward().is_some()
        };
        if !moved {
            return false;
        }
        debug!(%id, location = tab.target(), back, "history step");
        host.load(id, &tab.content());
        true
    }

    /// Reload the active surface, keeping its view state.
    pub fn reload_active(&mut self, host: &mut dyn SurfaceHost) -> bool {
        match self.active {
            Some(id) => {
                host.reload(id);
                true
            }
            None => false,
        }
    }

    /// Reload every document tab showing `target`. Returns how many.
    pub fn reload_document(&mut self, target: &str, host: &mut dyn SurfaceHost) -> usize {
        let ids: Vec<TabId> = self
            .order
            .iter()
            .filter(|id| {
                self.tabs
                    .get(*id)
                    .is_some_and(|t| t.kind.is_document() && t.target() == target)
            })
            .copied()
            .collect();
        for id in &ids {
            host.reload(*id);
        }
        ids.len()
    }
}
