//! Single-instance handoff over a Unix socket.
//!
//! The first launch binds the socket and becomes primary. Later launches
//! connect, write their target as one line, and exit.

use std::path::{Path, PathBuf};

use arview_common::PlatformError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outcome of [`acquire_instance`].
#[derive(Debug)]
pub enum InstanceRole {
    /// This process owns the socket and should serve forwarded targets.
    Primary(InstanceListener),
    /// The target was handed to a running instance.
    Secondary,
}

/// Try to hand `target` to a running instance, otherwise become primary.
#[cfg(unix)]
pub fn acquire_instance(socket: &Path, target: &str) -> Result<InstanceRole, PlatformError> {
    use std::io::Write;
    use std::os::unix::net::{UnixListener, UnixStream};

    match UnixStream::connect(socket) {
        Ok(mut stream) => {
            stream
                .write_all(format!("{}\n", target.trim()).as_bytes())
                .map_err(|e| PlatformError::SocketError(format!("forward target: {e}")))?;
            info!(socket = %socket.display(), "forwarded target to running instance");
            return Ok(InstanceRole::Secondary);
        }
        Err(e) => debug!("no running instance ({e})"),
    }

    if socket.exists() {
        std::fs::remove_file(socket)
            .map_err(|e| PlatformError::SocketError(format!("remove stale socket: {e}")))?;
    }

    let listener = UnixListener::bind(socket)
        .map_err(|e| PlatformError::SocketError(format!("bind {}: {e}", socket.display())))?;
    listener
        .set_nonblocking(true)
        .map_err(|e| PlatformError::SocketError(e.to_string()))?;

    Ok(InstanceRole::Primary(InstanceListener {
        path: socket.to_path_buf(),
        listener: Some(listener),
    }))
}

#[cfg(not(unix))]
pub fn acquire_instance(_socket: &Path, _target: &str) -> Result<InstanceRole, PlatformError> {
    Err(PlatformError::NotSupported("single-instance socket".into()))
}

/// Bound instance socket. Removes the socket file on drop.
#[derive(Debug)]
pub struct InstanceListener {
    path: PathBuf,
    #[cfg(unix)]
    listener: Option<std::os::unix::net::UnixListener>,
}

impl InstanceListener {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept connections forever, sending each non-empty line to `tx`.
    ///
    /// Must run inside a tokio runtime. Returns when `tx` is closed.
    #[cfg(unix)]
    pub async fn serve(mut self, tx: mpsc::UnboundedSender<String>) -> Result<(), PlatformError> {
        use tokio::io::{AsyncBufReadExt, BufReader};

        let std_listener = self
            .listener
            .take()
            .ok_or_else(|| PlatformError::SocketError("listener already served".into()))?;
        let listener = tokio::net::UnixListener::from_std(std_listener)
            .map_err(|e| PlatformError::SocketError(e.to_string()))?;

        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("instance socket accept failed: {e}");
                    continue;
                }
            };
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                info!(launch_target = line, "received target from second instance");
                if tx.send(line.to_string()).is_err() {
                    return Ok(());
                }
            }
        }
    }

    #[cfg(not(unix))]
    pub async fn serve(self, _tx: mpsc::UnboundedSender<String>) -> Result<(), PlatformError> {
        Err(PlatformError::NotSupported("single-instance socket".into()))
    }
}

impl Drop for InstanceListener {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!("instance socket cleanup: {e}");
        }
    }
}
