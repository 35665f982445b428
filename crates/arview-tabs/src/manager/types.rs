//! Core types, constructors and queries for TabManager.

use std::collections::HashMap;

use arview_common::{Margins, Rect, TabId, TabKind};
use serde::Serialize;

use crate::closed::ClosedTabRing;
use crate::layout;
use crate::session::TabSnapshot;
use crate::tab::Tab;

/// Something the app should react to (tab bar refresh, window title).
#[derive(Debug, Clone, PartialEq)]
pub enum TabEvent {
    Opened(TabId),
    Closed(TabId),
    Activated(TabId),
    TitleChanged(TabId, String),
}

/// Row of the tab bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSummary {
    pub id: u32,
    pub title: String,
    pub kind: TabKind,
    pub active: bool,
}

/// A mounted document tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTabInfo {
    pub id: u32,
    pub title: String,
    pub path: String,
}

/// Window geometry the inset bounds are computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Height reserved for the tab bar; 0 when hidden.
    pub tab_bar_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margins: Margins::default(),
            tab_bar_height: 0.0,
        }
    }
}

pub struct TabManager {
    pub(super) tabs: HashMap<TabId, Tab>,
    /// Display order.
    pub(super) order: Vec<TabId>,
    pub(super) active: Option<TabId>,
    pub(super) next_id: u32,
    pub(super) closed: ClosedTabRing,
    pub(super) viewport: Viewport,
    pub(super) events: Vec<TabEvent>,
}

impl TabManager {
    pub fn new(closed_capacity: usize) -> Self {
        Self {
            tabs: HashMap::new(),
            order: Vec::new(),
            active: None,
            next_id: 1,
            closed: ClosedTabRing::new(closed_capacity),
            viewport: Viewport::default(),
            events: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[TabId] {
        &self.order
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tabs.get(&id))
    }

    /// Position of the active tab in the order list.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.order.iter().position(|id| *id == active)
    }

    pub fn closed_tabs(&self) -> &ClosedTabRing {
        &self.closed
    }

    pub fn set_closed_capacity(&mut self, capacity: usize) {
        self.closed.set_capacity(capacity);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Where the active content surface goes.
    pub fn inset_bounds(&self) -> Rect {
        layout::inset_bounds(
            self.viewport.width,
            self.viewport.height,
            &self.viewport.margins,
            self.viewport.tab_bar_height,
        )
    }

    pub fn drain_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Queries --

    fn tabs_in_order(&self) -> impl Iterator<Item = &Tab> {
        self.order.iter().filter_map(|id| self.tabs.get(id))
    }

    pub fn first_document_tab(&self) -> Option<TabId> {
        self.tabs_in_order()
            .find(|t| t.kind.is_document())
            .map(|t| t.id)
    }

    pub fn first_pdf_tab(&self) -> Option<TabId> {
        self.tabs_in_order()
            .find(|t| t.kind == TabKind::Pdf)
            .map(|t| t.id)
    }

    /// Document tab showing `target`, if mounted.
    pub fn find_document(&self, target: &str) -> Option<TabId> {
        self.tabs_in_order()
            .find(|t| t.kind.is_document() && t.target() == target)
            .map(|t| t.id)
    }

    pub fn document_tabs(&self) -> Vec<DocumentTabInfo> {
        self.tabs_in_order()
            .filter(|t| t.kind.is_document())
            .map(|t| DocumentTabInfo {
                id: t.id.0,
                title: t.display_title().to_string(),
                path: t.target().to_string(),
            })
            .collect()
    }

    /// The web tab furthest along the order list.
    pub fn last_web_tab(&self) -> Option<TabId> {
        self.tabs_in_order()
            .filter(|t| t.kind == TabKind::Web)
            .last()
            .map(|t| t.id)
    }

    pub fn tab_summaries(&self) -> Vec<TabSummary> {
        self.tabs_in_order()
            .map(|t| TabSummary {
                id: t.id.0,
                title: t.display_title().to_string(),
                kind: t.kind,
                active: Some(t.id) == self.active,
            })
            .collect()
    }

    pub fn snapshot(&self, id: TabId) -> Option<TabSnapshot> {
        self.tabs.get(&id).map(Tab::snapshot)
    }

    /// Snapshots of every tab in order.
    pub fn snapshots(&self) -> Vec<TabSnapshot> {
        self.tabs_in_order().map(Tab::snapshot).collect()
    }

    pub fn view_state(&self, id: TabId) -> Option<&serde_json::Value> {
        self.tabs.get(&id).and_then(|t| t.view_state.as_ref())
    }
}
