use crate::schema::ArviewConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use arview_common::ConfigError;
use std::path::PathBuf;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// Manages live config reloading.
///
/// Watches the config file and publishes each successfully validated
/// config on a [`tokio::sync::watch`] channel. Invalid edits are logged and
/// the previous config stays current.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    /// Load the initial config from `config_path` and start watching it.
    ///
    /// Must be called inside a tokio runtime. A missing or unreadable file
    /// yields the defaults.
    pub fn start(config_path: PathBuf) -> (ArviewConfig, watch::Receiver<ArviewConfig>) {
        let manager = ReloadManager { config_path };

        let initial = match manager.reload_config() {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                ArviewConfig::default()
            }
        };

        let (config_tx, config_rx) = watch::channel(initial.clone());
        tokio::spawn(async move {
            manager.run_watch_loop(config_tx).await;
        });

        (initial, config_rx)
    }

    async fn run_watch_loop(&self, config_tx: watch::Sender<ArviewConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher error: {e}");
            }
        });

        loop {
            match change_rx.recv().await {
                Ok(()) => {
                    info!(path = %self.config_path.display(), "reloading config");
                    match self.reload_config() {
                        Ok(config) => {
                            if config_tx.send(config).is_err() {
                                info!("all config receivers dropped, stopping reload manager");
                                break;
                            }
                        }
                        Err(e) => warn!("config reload failed: {e}"),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("config watcher lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("config watcher channel closed");
                    break;
                }
            }
        }
    }

    fn reload_config(&self) -> Result<ArviewConfig, ConfigError> {
        let config = toml_loader::load_from_path(&self.config_path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
