//! Bridge between tab bookkeeping and the native webviews.
//!
//! Implements `SurfaceHost` over the webview registry, routes IPC from
//! pages, and keeps webview bounds in step with the window.

mod bounds;
mod host;
mod ipc_dispatch;
mod lifecycle;
mod mailbox;

pub(super) use bounds::rect_to_wry;
pub(super) use host::{DetachedHost, WebViewHost};
pub(super) use ipc_dispatch::{register_overlay_routes, OverlayInbox, OverlayMessage};
pub(super) use mailbox::ViewMailbox;
