//! Native webviews for tab content and overlay panels.
//!
//! Wraps the `wry` crate to provide:
//! - one child webview per tab or overlay, keyed by [`ViewId`]
//! - a JSON IPC bridge between Rust and the viewer pages
//! - the `arview://` protocol serving bundled pages and opened documents
//! - page load, title and navigation events for the main loop

pub mod content;
pub mod errors;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod view;

pub use content::ContentProvider;
pub use errors::WebViewError;
pub use events::{PageLoadState, WebViewEvent};
pub use ipc::IpcMessage;
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};
pub use view::ViewId;
