//! Parent-process liveness for `--ppid`.

use std::time::Duration;

use arview_common::PlatformError;
use tracing::info;

pub const PARENT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Signal-0 probe. `EPERM` still means the process exists.
#[cfg(unix)]
pub fn is_process_alive(pid: u32) -> Result<bool, PlatformError> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| PlatformError::ProcessError(format!("pid out of range: {pid}")))?;
    if pid <= 0 {
        return Err(PlatformError::ProcessError(format!("invalid pid: {pid}")));
    }
    let rc = unsafe { libc::kill(pid, 0) };
    if rc == 0 {
        return Ok(true);
    }
    let err = std::io::Error::last_os_error();
    Ok(err.raw_os_error() == Some(libc::EPERM))
}

#[cfg(not(unix))]
pub fn is_process_alive(_pid: u32) -> Result<bool, PlatformError> {
    Err(PlatformError::NotSupported("parent process watch".into()))
}

/// Resolve once `pid` is gone, polling every `interval`.
pub async fn watch_parent(pid: u32, interval: Duration) -> Result<(), PlatformError> {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if !is_process_alive(pid)? {
            info!(pid, "parent process exited");
            return Ok(());
        }
    }
}
