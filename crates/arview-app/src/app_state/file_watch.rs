//! Live reload of the open document.
//!
//! LaTeX and Markdown tools write a file in several bursts. A change is only
//! reported once no write has landed for the stability threshold.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use arview_common::Event;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::core::ArviewApp;

/// Tracks the last write and reports once writes have settled.
#[derive(Debug)]
pub(super) struct WriteStabilizer {
    threshold: Duration,
    last_event: Option<Instant>,
}

impl WriteStabilizer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_event: None,
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.last_event = Some(at);
    }

    /// True exactly once per burst, when `threshold` has passed since its
    /// last write.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if now.saturating_duration_since(last) >= self.threshold => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}

/// Watches one document and calls back after each settled burst of writes.
pub(super) struct DocumentWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl DocumentWatcher {
    pub fn start(
        path: PathBuf,
        threshold: Duration,
        poll_interval: Duration,
        runtime: &tokio::runtime::Handle,
        on_change: impl Fn(PathBuf) + Send + 'static,
    ) -> Result<Self, notify::Error> {
        let watch_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();

        let (tx, mut rx) = mpsc::channel::<()>(64);
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<notify::Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    if event
                        .paths
                        .iter()
                        .any(|p| p.file_name().is_some_and(|n| n == file_name))
                    {
                        let _ = tx.try_send(());
                    }
                }
                Err(e) => tracing::error!("document watcher error: {e}"),
            },
            notify::Config::default(),
        )?;
        // The directory, so write-then-rename saves are still seen.
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        let poll_interval = poll_interval.max(Duration::from_millis(10));
        let changed = path.clone();
        let task = runtime.spawn(async move {
            let mut stabilizer = WriteStabilizer::new(threshold);
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    msg = rx.recv() => match msg {
                        Some(()) => stabilizer.record(Instant::now()),
                        None => break,
                    },
                    _ = ticker.tick() => {
                        if stabilizer.poll(Instant::now()) {
                            tracing::debug!(path = %changed.display(), "document settled");
                            on_change(changed.clone());
                        }
                    }
                }
            }
        });

        tracing::info!(path = %path.display(), "watching document");
        Ok(Self {
            path,
            _watcher: watcher,
            task,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocumentWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl ArviewApp {
    /// The file whose writes reload tabs: the active workspace's anchor,
    /// else the first document tab.
    fn watch_target(&self) -> Option<PathBuf> {
        if let Some(workspace) = self.coordinator.workspaces().active() {
            return Some(PathBuf::from(&workspace.file_path));
        }
        let tabs = self.coordinator.tabs();
        tabs.first_document_tab()
            .and_then(|id| tabs.tab(id))
            .map(|tab| PathBuf::from(tab.target()))
    }

    /// Point the watcher at the current anchor with the current thresholds.
    pub(super) fn retarget_watcher(&mut self) {
        self.watcher = None;
        let (Some(path), Some(runtime)) = (self.watch_target(), self.tokio_runtime.as_ref()) else {
            return;
        };
        let watching = &self.config.file_watching;
        let tx = self.cmd_tx.clone();
        match DocumentWatcher::start(
            path.clone(),
            watching.stability_threshold(),
            watching.poll_interval(),
            runtime.handle(),
            move |changed| {
                let _ = tx.send(super::types::AppCommand::FileChanged(changed));
            },
        ) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(e) => tracing::warn!(path = %path.display(), "cannot watch document: {e}"),
        }
    }

    /// Reload every tab showing `path`, keeping each one's view state.
    pub(super) fn reload_document(&mut self, path: PathBuf) {
        let target = path.display().to_string();
        let reloaded = self.with_host(|c, host| c.tabs_mut().reload_document(&target, host));
        tracing::info!(path = %target, reloaded, "document changed");
        self.event_bus.publish(Event::FileChanged(path));
    }
}
