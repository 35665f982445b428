use std::fmt;

use arview_common::TabId;

/// Which surface a webview belongs to.
///
/// Overlays are named by their IPC channel target (`palette`, `chat`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Tab(TabId),
    Overlay(&'static str),
}

impl ViewId {
    pub fn tab(self) -> Option<TabId> {
        match self {
            ViewId::Tab(id) => Some(id),
            ViewId::Overlay(_) => None,
        }
    }

    pub fn overlay(self) -> Option<&'static str> {
        match self {
            ViewId::Overlay(name) => Some(name),
            ViewId::Tab(_) => None,
        }
    }
}

impl From<TabId> for ViewId {
    fn from(id: TabId) -> Self {
        ViewId::Tab(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewId::Tab(id) => write!(f, "{id}"),
            ViewId::Overlay(name) => write!(f, "overlay:{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let tab = ViewId::from(TabId(2));
        assert_eq!(tab.tab(), Some(TabId(2)));
        assert_eq!(tab.overlay(), None);
        assert_eq!(ViewId::Overlay("chat").overlay(), Some("chat"));
        assert_eq!(ViewId::Overlay("chat").to_string(), "overlay:chat");
    }
}
