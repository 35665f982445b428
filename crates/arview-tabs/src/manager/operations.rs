//! Create, switch, close and reopen operations on the TabManager.

use std::path::Path;

use arview_common::{Margins, TabId, TabKind};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::TabError;
use crate::history::NavigationHistory;
use crate::session::TabSnapshot;
use crate::surface::SurfaceHost;
use crate::tab::{normalize_url, Tab};

use super::{TabEvent, TabManager};

impl TabManager {
    fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create the surface, register the tab at the end of the order and
    /// activate it.
    fn mount(&mut self, tab: Tab, host: &mut dyn SurfaceHost) -> Result<TabId, TabError> {
        let id = tab.id;
        host.create(id, &tab.content())?;
        debug!(%id, kind = %tab.kind, location = tab.target(), "tab mounted");
        self.tabs.insert(id, tab);
        self.order.push(id);
        self.events.push(TabEvent::Opened(id));
        self.switch_to_tab(id, host);
        Ok(id)
    }

    /// Switch to the document tab for `path`, creating it if needed.
    pub fn get_or_create_document_tab(
        &mut self,
        path: &Path,
        host: &mut dyn SurfaceHost,
    ) -> Result<TabId, TabError> {
        let kind = TabKind::for_path(path)
            .filter(|k| k.is_document())
            .ok_or_else(|| TabError::NotADocument(path.to_path_buf()))?;
        let target = path.display().to_string();

        if let Some(id) = self.find_document(&target) {
            self.switch_to_tab(id, host);
            return Ok(id);
        }

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.clone());
        let id = self.allocate_id();
        self.mount(Tab::new(id, kind, target, title), host)
    }

    /// Open `url` in a new web tab. Bare hosts get `https://`.
    pub fn create_web_tab(&mut self, url: &str, host: &mut dyn SurfaceHost) -> Result<TabId, TabError> {
        let id = self.allocate_id();
        self.mount(Tab::new(id, TabKind::Web, normalize_url(url), ""), host)
    }

    /// Mount a web tab with a saved history.
    pub fn restore_web_tab(
        &mut self,
        history: NavigationHistory,
        title: &str,
        host: &mut dyn SurfaceHost,
    ) -> Result<TabId, TabError> {
        let id = self.allocate_id();
        let mut tab = Tab::new(id, TabKind::Web, "", title);
        tab.history = history;
        self.mount(tab, host)
    }

    /// Mount a tab from a snapshot. Document tabs get their view state back.
    pub fn restore_snapshot(
        &mut self,
        snapshot: &TabSnapshot,
        host: &mut dyn SurfaceHost,
    ) -> Result<TabId, TabError> {
        match snapshot {
            TabSnapshot::Web {
                target,
                title,
                history,
                history_index,
            } => {
                let history = NavigationHistory::from_parts(history.clone(), *history_index)
                    .unwrap_or_else(|| NavigationHistory::new(target.clone()));
                self.restore_web_tab(history, title, host)
            }
            TabSnapshot::Pdf { target, .. } | TabSnapshot::Markdown { target, .. } => {
                let id = self.get_or_create_document_tab(Path::new(target), host)?;
                if let Some(state) = snapshot.view_state() {
                    self.apply_view_state(id, state.clone(), host);
                }
                Ok(id)
            }
        }
    }

    /// Hide the current surface and show `id` at the inset bounds.
    /// Unknown ids are ignored.
    pub fn switch_to_tab(&mut self, id: TabId, host: &mut dyn SurfaceHost) -> bool {
        if !self.tabs.contains_key(&id) {
            return false;
        }
        if let Some(prev) = self.active {
            if prev != id {
                host.set_visible(prev, false);
            }
        }
        host.set_bounds(id, self.inset_bounds());
        host.set_visible(id, true);
        if self.active != Some(id) {
            self.active = Some(id);
            self.events.push(TabEvent::Activated(id));
        }
        true
    }

    /// Move `id` to the start of the order list.
    pub fn move_to_front(&mut self, id: TabId) -> bool {
        let Some(index) = self.order.iter().position(|t| *t == id) else {
            return false;
        };
        let id = self.order.remove(index);
        self.order.insert(0, id);
        true
    }

    /// 1-based index into the order list. Out of range is a no-op.
    pub fn switch_to_tab_by_index(&mut self, n: usize, host: &mut dyn SurfaceHost) -> bool {
        match n.checked_sub(1).and_then(|i| self.order.get(i)).copied() {
            Some(id) => self.switch_to_tab(id, host),
            None => false,
        }
    }

    /// Close an auxiliary web tab. Document tabs anchor the workspace and
    /// are refused.
    pub fn close_tab(&mut self, id: TabId, host: &mut dyn SurfaceHost) -> bool {
        let Some(tab) = self.tabs.get(&id) else {
            return false;
        };
        if tab.kind.is_document() {
            debug!(%id, "refusing to close document tab");
            return false;
        }

        let Some(index) = self.order.iter().position(|t| *t == id) else {
            return false;
        };
        self.closed.push(tab.snapshot());
        self.order.remove(index);
        self.tabs.remove(&id);
        host.destroy(id);
        self.events.push(TabEvent::Closed(id));
        info!(%id, closed = self.closed.len(), "tab closed");

        if self.active == Some(id) {
            self.active = None;
            let next = self.order.get(index).or_else(|| self.order.first()).copied();
            if let Some(next) = next {
                self.switch_to_tab(next, host);
            }
        }
        true
    }

    /// Close the active tab when it is closable.
    pub fn close_active(&mut self, host: &mut dyn SurfaceHost) -> bool {
        match self.active {
            Some(id) => self.close_tab(id, host),
            None => false,
        }
    }

    /// Bring back the most recently closed tab.
    pub fn reopen_closed_tab(&mut self, host: &mut dyn SurfaceHost) -> Result<Option<TabId>, TabError> {
        let Some(snapshot) = self.closed.pop() else {
            return Ok(None);
        };
        match self.restore_snapshot(&snapshot, host) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!("failed to reopen closed tab: {e}");
                self.closed.push(snapshot);
                Err(e)
            }
        }
    }

    /// Unmount and destroy every tab. The closed ring is kept.
    pub fn clear(&mut self, host: &mut dyn SurfaceHost) {
        for id in self.order.drain(..) {
            host.destroy(id);
            self.events.push(TabEvent::Closed(id));
        }
        self.tabs.clear();
        self.active = None;
    }

    // -- Geometry --

    fn relayout(&self, host: &mut dyn SurfaceHost) {
        if let Some(id) = self.active {
            host.set_bounds(id, self.inset_bounds());
        }
    }

    pub fn set_window_size(&mut self, width: f64, height: f64, host: &mut dyn SurfaceHost) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.relayout(host);
    }

    pub fn set_margins(&mut self, margins: Margins, host: &mut dyn SurfaceHost) {
        self.viewport.margins = margins;
        self.relayout(host);
    }

    pub fn set_tab_bar_height(&mut self, height: f64, host: &mut dyn SurfaceHost) {
        self.viewport.tab_bar_height = height.max(0.0);
        self.relayout(host);
    }

    // -- View state --

    /// Cache a view state reported by a document surface.
    pub fn update_view_state(&mut self, id: TabId, state: Value) {
        if let Some(tab) = self.tabs.get_mut(&id) {
            if tab.kind.is_document() {
                tab.view_state = Some(state);
            }
        }
    }

    /// Cache `state` and push it to the surface.
    pub fn apply_view_state(&mut self, id: TabId, state: Value, host: &mut dyn SurfaceHost) {
        host.restore_view_state(id, &state);
        self.update_view_state(id, state);
    }
}
