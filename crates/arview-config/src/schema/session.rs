//! File watching and session persistence settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Live-reload stabilization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWatchingConfig {
    /// Quiet period after the last write before reloading (valid range: 100-5000).
    pub stability_threshold_ms: u32,
    /// How often the quiet period is checked (valid range: 50-1000).
    pub poll_interval_ms: u32,
}

impl Default for FileWatchingConfig {
    fn default() -> Self {
        Self {
            stability_threshold_ms: 300,
            poll_interval_ms: 100,
        }
    }
}

impl FileWatchingConfig {
    pub fn stability_threshold(&self) -> Duration {
        Duration::from_millis(u64::from(self.stability_threshold_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Capacity of the closed-tab ring (valid range: 1-100).
    pub max_closed_tabs: u32,
    /// Save tab state whenever a workspace is left.
    pub auto_save: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_closed_tabs: 30,
            auto_save: true,
        }
    }
}
