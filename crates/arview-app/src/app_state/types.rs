//! Internal types and constants for the app state module.

use std::path::PathBuf;
use std::time::Duration;

use arview_common::Margins;
use arview_platform::{InstanceListener, PdfLocation};

use crate::cli::{LaunchTarget, DEFAULT_URL};

/// How often to poll for events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Capacity of the app-wide event broadcast.
pub(super) const EVENT_BUS_CAPACITY: usize = 256;

/// Results sent back to the main thread by background tasks.
#[derive(Debug)]
pub(super) enum AppCommand {
    /// A watched document settled after a burst of writes.
    FileChanged(PathBuf),
    ChatReply(Result<String, String>),
    ChatModels {
        provider: String,
        result: Result<Vec<String>, String>,
    },
    /// Forward search resolved to a spot in `pdf`.
    SyncTexScroll { pdf: PathBuf, location: PdfLocation },
    ParentExited,
}

/// Everything decided before the event loop starts.
#[derive(Debug)]
pub struct LaunchOptions {
    pub target: LaunchTarget,
    pub config_path: PathBuf,
    /// Command-line margins. They win over the config file, including on reload.
    pub margins: Option<Margins>,
    pub background: Option<String>,
    pub parent_pid: Option<u32>,
    pub instance: Option<InstanceListener>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            target: LaunchTarget::Url(DEFAULT_URL.to_string()),
            config_path: PathBuf::from("config.toml"),
            margins: None,
            background: None,
            parent_pid: None,
            instance: None,
        }
    }
}
