//! Webview event types.

use serde::{Deserialize, Serialize};

use crate::view::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events pushed by webview callbacks for the main loop to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    PageLoad {
        view: ViewId,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        view: ViewId,
        title: String,
    },
    /// Raw JSON body posted from the page.
    IpcMessage {
        view: ViewId,
        body: String,
    },
    /// An allowed top-level navigation.
    NavigationRequested {
        view: ViewId,
        url: String,
    },
    Closed {
        view: ViewId,
    },
}

impl WebViewEvent {
    pub fn view(&self) -> ViewId {
        match self {
            WebViewEvent::PageLoad { view, .. }
            | WebViewEvent::TitleChanged { view, .. }
            | WebViewEvent::IpcMessage { view, .. }
            | WebViewEvent::NavigationRequested { view, .. }
            | WebViewEvent::Closed { view } => *view,
        }
    }
}
