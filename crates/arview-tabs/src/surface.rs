//! The seam between tab bookkeeping and native content surfaces.

use arview_common::{Rect, TabId, TabKind};
use serde_json::Value;

use crate::errors::TabError;

/// What a surface shows: a document viewer page or a web URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceContent {
    pub kind: TabKind,
    pub target: String,
}

impl SurfaceContent {
    pub fn new(kind: TabKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }
}

/// Owner of the native views backing tabs, keyed by [`TabId`].
///
/// Tab bookkeeping calls into the host; the host never calls back.
pub trait SurfaceHost {
    /// Create a hidden surface for `tab` and start loading `content`.
    fn create(&mut self, tab: TabId, content: &SurfaceContent) -> Result<(), TabError>;
    /// Release the surface. Unknown ids are ignored.
    fn destroy(&mut self, tab: TabId);
    fn set_bounds(&mut self, tab: TabId, bounds: Rect);
    fn set_visible(&mut self, tab: TabId, visible: bool);
    /// Navigate an existing surface to new content.
    fn load(&mut self, tab: TabId, content: &SurfaceContent);
    /// Reload in place, keeping scroll position and zoom.
    fn reload(&mut self, tab: TabId);
    /// Hand a previously captured view state back to a document surface.
    fn restore_view_state(&mut self, tab: TabId, state: &Value);
}
