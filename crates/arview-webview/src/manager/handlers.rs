use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};
use crate::view::ViewId;

use super::{push, EventQueue, WebViewManager};

// =============================================================================
// NAVIGATION POLICY
// =============================================================================

/// Prefixes every webview may navigate to.
pub const LOCAL_NAV_PREFIXES: &[&str] = &[
    "arview://",
    // WebView2 rewrites arview://localhost/… to http://arview.localhost/…
    "http://arview.localhost",
    "about:blank",
];

/// Prefixes web tabs may additionally navigate to.
pub const WEB_NAV_PREFIXES: &[&str] = &["https://", "http://"];

/// Whether a view may navigate to `url`.
pub fn is_navigation_allowed(url: &str, local_only: bool) -> bool {
    if LOCAL_NAV_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return true;
    }
    !local_only && WEB_NAV_PREFIXES.iter().any(|p| url.starts_with(p))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventQueue,
        view: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(%view, body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(%view, body_len = body.len(), "IPC message from page");
            push(&events, WebViewEvent::IpcMessage { view, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventQueue,
        view: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(%view, ?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { view, state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventQueue,
        view: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            push(&events, WebViewEvent::TitleChanged { view, title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventQueue,
        view: ViewId,
        local_only: bool,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url, local_only) {
                warn!(%view, url = %url, "navigation blocked");
                return false;
            }
            push(&events, WebViewEvent::NavigationRequested { view, url });
            true
        })
    }
}
