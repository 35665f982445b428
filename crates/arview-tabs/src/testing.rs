//! Recording [`SurfaceHost`] used by the unit tests.

use std::collections::{BTreeMap, BTreeSet};

use arview_common::{Rect, TabId};
use serde_json::Value;

use crate::errors::TabError;
use crate::surface::{SurfaceContent, SurfaceHost};

#[derive(Default)]
pub(crate) struct RecordingHost {
    pub live: BTreeMap<TabId, SurfaceContent>,
    pub visible: BTreeSet<TabId>,
    pub bounds: BTreeMap<TabId, Rect>,
    pub reloads: Vec<TabId>,
    pub loads: Vec<(TabId, String)>,
    pub view_states: Vec<(TabId, Value)>,
    pub destroyed: Vec<TabId>,
    /// Targets whose surface creation fails.
    pub fail_targets: BTreeSet<String>,
}

impl RecordingHost {
    pub fn visible_ids(&self) -> Vec<TabId> {
        self.visible.iter().copied().collect()
    }
}

impl SurfaceHost for RecordingHost {
    fn create(&mut self, tab: TabId, content: &SurfaceContent) -> Result<(), TabError> {
        if self.fail_targets.contains(&content.target) {
            return Err(TabError::Surface(format!("cannot load {}", content.target)));
        }
        assert!(self.live.insert(tab, content.clone()).is_none(), "{tab} created twice");
        Ok(())
    }

    fn destroy(&mut self, tab: TabId) {
        self.live.remove(&tab);
        self.visible.remove(&tab);
        self.destroyed.push(tab);
    }

    fn set_bounds(&mut self, tab: TabId, bounds: Rect) {
        assert!(self.live.contains_key(&tab), "bounds on dead surface {tab}");
        self.bounds.insert(tab, bounds);
    }

    fn set_visible(&mut self, tab: TabId, visible: bool) {
        assert!(self.live.contains_key(&tab), "visibility on dead surface {tab}");
        if visible {
            self.visible.insert(tab);
        } else {
            self.visible.remove(&tab);
        }
    }

    fn load(&mut self, tab: TabId, content: &SurfaceContent) {
        self.loads.push((tab, content.target.clone()));
        if let Some(slot) = self.live.get_mut(&tab) {
            *slot = content.clone();
        }
    }

    fn reload(&mut self, tab: TabId) {
        self.reloads.push(tab);
    }

    fn restore_view_state(&mut self, tab: TabId, state: &Value) {
        self.view_states.push((tab, state.clone()));
    }
}
