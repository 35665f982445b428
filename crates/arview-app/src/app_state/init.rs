//! Window creation, webview setup and background tasks.

use std::path::PathBuf;
use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use arview_platform::{watch_parent, ForwardSearchServer, FORWARD_SEARCH_SOCKET, PARENT_POLL_INTERVAL};
use arview_webview::{ContentProvider, WebViewManager, WebViewRegistry};

use super::core::ArviewApp;
use super::overlays::TABBAR;
use super::types::AppCommand;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Bundled viewer and overlay pages, relative to the working directory.
const ASSETS_DIR: &str = "assets";

/// Overrides [`ASSETS_DIR`].
const ASSETS_ENV: &str = "ARVIEW_ASSETS";

fn assets_dir() -> PathBuf {
    match std::env::var_os(ASSETS_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().unwrap_or_default().join(ASSETS_DIR),
    }
}

// =============================================================================
// INITIALIZATION
// =============================================================================

impl ArviewApp {
    /// Create the window. Returns `false` if the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("arview")
            .with_decorations(false)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        self.window = Some(window);
        self.initialize_webviews();
        tracing::info!("Window created");
        true
    }

    /// Set up the WebView registry with the content provider for `arview://`.
    fn initialize_webviews(&mut self) {
        let assets = assets_dir();
        if !assets.is_dir() {
            tracing::warn!(
                path = %assets.display(),
                "Assets directory not found, viewer pages will not load"
            );
        }

        let mut manager = WebViewManager::new();
        manager.set_content_provider(ContentProvider::new(&assets));
        self.webviews = Some(WebViewRegistry::new(manager));
        tracing::info!(assets_dir = %assets.display(), "WebView registry initialized");
    }

    /// Everything after the window exists: backdrop, first tabs, tab bar,
    /// background listeners and the document watcher.
    pub(super) fn start(&mut self) {
        self.create_backdrop();
        self.sync_webview_bounds();

        if let Some(target) = self.launch_target.take() {
            self.open_launch_target(target);
        }
        if self.overlays.is_visible(TABBAR) {
            self.show_overlay(TABBAR);
        }
        self.start_background_tasks();
        self.retarget_watcher();
    }

    fn start_background_tasks(&mut self) {
        let Some(handle) = self.tokio_runtime.as_ref().map(|rt| rt.handle().clone()) else {
            return;
        };

        if let Some(listener) = self.instance.take() {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            self.instance_rx = Some(rx);
            handle.spawn(async move {
                if let Err(e) = listener.serve(tx).await {
                    tracing::warn!("instance listener stopped: {e}");
                }
            });
        }

        let _guard = handle.enter();
        match ForwardSearchServer::bind(FORWARD_SEARCH_SOCKET) {
            Ok(server) => {
                handle.spawn(server.run(self.event_bus.sender()));
            }
            Err(e) => tracing::warn!("forward search unavailable: {e}"),
        }

        if let Some(pid) = self.parent_pid {
            let tx = self.cmd_tx.clone();
            handle.spawn(async move {
                match watch_parent(pid, PARENT_POLL_INTERVAL).await {
                    Ok(()) => {
                        let _ = tx.send(AppCommand::ParentExited);
                    }
                    Err(e) => tracing::warn!(pid, "cannot watch parent process: {e}"),
                }
            });
        }
    }
}
