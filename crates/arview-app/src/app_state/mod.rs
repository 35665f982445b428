//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the tab and workspace coordinator, the webview registry
//! that backs it, the overlay panels and the background tasks that feed
//! the loop.

mod core;
mod dispatch;
mod event_handler;
mod file_watch;
mod init;
mod overlays;
mod polling;
mod shutdown;
mod synctex_bridge;
mod types;
mod webview_bridge;

pub use core::ArviewApp;
pub use types::LaunchOptions;
