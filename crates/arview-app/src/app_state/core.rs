//! ArviewApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, watch};
use winit::window::Window;

use arview_ai::{ChatSession, ChatSettings};
use arview_common::{ChannelManager, Event, EventBus, HandlerBus, Margins, StateStore};
use arview_config::ArviewConfig;
use arview_platform::InstanceListener;
use arview_tabs::{QuickListStore, SessionStore, TabManager, WorkspaceCoordinator, WorkspaceManager};
use arview_webview::WebViewRegistry;

use crate::cli::LaunchTarget;

use super::file_watch::DocumentWatcher;
use super::overlays::OverlayState;
use super::types::{AppCommand, LaunchOptions, EVENT_BUS_CAPACITY};
use super::webview_bridge::{register_overlay_routes, DetachedHost, OverlayInbox, ViewMailbox};

/// Top-level application state.
pub struct ArviewApp {
    pub(super) config: ArviewConfig,
    pub(super) config_path: PathBuf,
    pub(super) event_bus: EventBus,
    pub(super) bus_rx: broadcast::Receiver<Event>,

    // Overlay IPC routing
    pub(super) channels: ChannelManager,
    pub(super) overlay_inbox: OverlayInbox,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewRegistry>,
    pub(super) mailbox: ViewMailbox,
    /// Bumped for every tab surface created, so overlays know when they
    /// have been buried under a newer view.
    pub(super) surface_serial: u64,

    // Modifier tracking (winit sends these separately)
    pub(super) modifiers: winit::keyboard::ModifiersState,

    // Tabs and workspaces
    pub(super) coordinator: WorkspaceCoordinator,
    pub(super) quicklists: QuickListStore,
    pub(super) watcher: Option<DocumentWatcher>,

    pub(super) overlays: OverlayState,

    // AI chat
    pub(super) chat: Arc<ChatSession>,
    pub(super) chat_settings: ChatSettings,
    pub(super) chat_settings_path: Option<PathBuf>,

    // Launch options, consumed once the window exists
    pub(super) launch_target: Option<LaunchTarget>,
    pub(super) margin_override: Option<Margins>,
    pub(super) background_override: Option<String>,
    pub(super) parent_pid: Option<u32>,
    pub(super) instance: Option<InstanceListener>,

    // Background work
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) config_rx: Option<watch::Receiver<ArviewConfig>>,
    pub(super) instance_rx: Option<tokio::sync::mpsc::UnboundedReceiver<String>>,
    pub(super) cmd_tx: mpsc::Sender<AppCommand>,
    pub(super) cmd_rx: mpsc::Receiver<AppCommand>,

    // Whether the app should exit
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl ArviewApp {
    pub fn new(config: ArviewConfig, store: Arc<dyn StateStore>, options: LaunchOptions) -> Self {
        let margins = options.margins.unwrap_or(config.appearance.margins);

        let mut tabs = TabManager::new(config.session.max_closed_tabs as usize);
        tabs.set_margins(margins, &mut DetachedHost);
        if config.tabs.show {
            tabs.set_tab_bar_height(f64::from(config.tabs.height), &mut DetachedHost);
        }

        let mut coordinator = WorkspaceCoordinator::new(
            tabs,
            WorkspaceManager::load(Arc::clone(&store)),
            SessionStore::new(Arc::clone(&store)),
        );
        coordinator.set_auto_save(config.session.auto_save);

        let chat_settings_path = arview_platform::ai_settings_file().ok();
        let chat_settings = chat_settings_path
            .as_deref()
            .map(ChatSettings::load)
            .unwrap_or_default();

        let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
        let bus_rx = event_bus.subscribe();
        let channels = ChannelManager::new(HandlerBus::new("overlays"));
        let overlay_inbox = register_overlay_routes(&channels);
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let overlays = OverlayState::new(config.tabs.show);

        Self {
            config,
            config_path: options.config_path,
            event_bus,
            bus_rx,
            channels,
            overlay_inbox,
            window: None,
            webviews: None,
            mailbox: ViewMailbox::default(),
            surface_serial: 0,
            modifiers: winit::keyboard::ModifiersState::empty(),
            coordinator,
            quicklists: QuickListStore::new(store),
            watcher: None,
            overlays,
            chat: Arc::new(ChatSession::new()),
            chat_settings,
            chat_settings_path,
            launch_target: Some(options.target),
            margin_override: options.margins,
            background_override: options.background,
            parent_pid: options.parent_pid,
            instance: options.instance,
            tokio_runtime: None,
            config_rx: None,
            instance_rx: None,
            cmd_tx,
            cmd_rx,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }

    /// Hand over the runtime that background tasks run on and the live
    /// config channel fed by it.
    pub fn attach_runtime(
        &mut self,
        runtime: tokio::runtime::Runtime,
        config_rx: watch::Receiver<ArviewConfig>,
    ) {
        self.tokio_runtime = Some(runtime);
        self.config_rx = Some(config_rx);
    }

    /// Margins in effect: command-line values, else the config file.
    pub(super) fn effective_margins(&self) -> Margins {
        self.margin_override
            .unwrap_or(self.config.appearance.margins)
    }

    pub(super) fn background(&self) -> &str {
        self.background_override
            .as_deref()
            .unwrap_or(&self.config.appearance.background)
    }

    /// Window size in logical pixels, or the tab manager's last known size
    /// before the window exists.
    pub(super) fn window_size(&self) -> (f64, f64) {
        match &self.window {
            Some(w) => {
                let size = w.inner_size().to_logical::<f64>(w.scale_factor());
                (size.width, size.height)
            }
            None => {
                let viewport = self.coordinator.tabs().viewport();
                (viewport.width, viewport.height)
            }
        }
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use super::*;
    use arview_common::MemoryStore;

    /// An app with in-memory state, no window and no chat settings file.
    pub fn app() -> ArviewApp {
        app_with(ArviewConfig::default())
    }

    pub fn app_with(config: ArviewConfig) -> ArviewApp {
        let mut app = ArviewApp::new(config, Arc::new(MemoryStore::new()), LaunchOptions::default());
        app.chat_settings_path = None;
        app.chat_settings = ChatSettings::default();
        app
    }
}
