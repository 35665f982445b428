//! Forward-search socket: editors ask the viewer to scroll to a source line.
//!
//! Clients write newline-delimited JSON such as
//! `{"type":"forward-search","sourcePath":"/work/intro.tex","line":42}`.
//! Messages of any other type are ignored.

use std::path::{Path, PathBuf};

use arview_common::{Event, PlatformError};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub const FORWARD_SEARCH_SOCKET: &str = "/tmp/arview-forward.sock";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForwardSearchMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    source_path: Option<PathBuf>,
    #[serde(default)]
    line: Option<u32>,
}

/// Parse one line from a client into an [`Event::ForwardSearch`].
pub fn parse_message(line: &str) -> Option<Event> {
    let message: ForwardSearchMessage = match serde_json::from_str(line) {
        Ok(m) => m,
        Err(e) => {
            warn!("invalid forward search message: {e}");
            return None;
        }
    };
    if message.kind != "forward-search" {
        debug!(kind = %message.kind, "ignoring forward search socket message");
        return None;
    }
    Some(Event::ForwardSearch {
        source_path: message.source_path?,
        line: message.line?,
    })
}

pub struct ForwardSearchServer {
    path: PathBuf,
    #[cfg(unix)]
    listener: tokio::net::UnixListener,
}

impl ForwardSearchServer {
    /// Bind the socket, replacing a stale socket file. Must be called
    /// inside a tokio runtime.
    #[cfg(unix)]
    pub fn bind(path: impl Into<PathBuf>) -> Result<Self, PlatformError> {
        let path = path.into();
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| PlatformError::SocketError(format!("remove stale socket: {e}")))?;
        }
        let listener = tokio::net::UnixListener::bind(&path)
            .map_err(|e| PlatformError::SocketError(format!("bind {}: {e}", path.display())))?;
        info!(socket = %path.display(), "forward search server listening");
        Ok(Self { path, listener })
    }

    #[cfg(not(unix))]
    pub fn bind(_path: impl Into<PathBuf>) -> Result<Self, PlatformError> {
        Err(PlatformError::NotSupported("forward search socket".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept clients until the process exits, publishing each request.
    #[cfg(unix)]
    pub async fn run(self, events: broadcast::Sender<Event>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    tokio::spawn(handle_client(stream, events.clone()));
                }
                Err(e) => warn!("forward search accept failed: {e}"),
            }
        }
    }

    #[cfg(not(unix))]
    pub async fn run(self, _events: broadcast::Sender<Event>) {}
}

#[cfg(unix)]
async fn handle_client(stream: tokio::net::UnixStream, events: broadcast::Sender<Event>) {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(event) = parse_message(&line) {
                    if events.send(event).is_err() {
                        debug!("no listeners for forward search");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("forward search client error: {e}");
                break;
            }
        }
    }
}

impl Drop for ForwardSearchServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forward_search() {
        let event =
            parse_message(r#"{"type":"forward-search","sourcePath":"/w/intro.tex","line":42}"#);
        match event {
            Some(Event::ForwardSearch { source_path, line }) => {
                assert_eq!(source_path, PathBuf::from("/w/intro.tex"));
                assert_eq!(line, 42);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn other_types_are_ignored() {
        assert!(parse_message(r#"{"type":"ping"}"#).is_none());
        assert!(parse_message("not json").is_none());
        assert!(parse_message(r#"{"type":"forward-search","line":3}"#).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn socket_publishes_events() {
        use std::time::Duration;
        use tokio::io::AsyncWriteExt;

        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("forward.sock");
        std::fs::write(&socket, "stale").unwrap();

        let server = ForwardSearchServer::bind(&socket).unwrap();
        let (tx, mut rx) = broadcast::channel(8);
        tokio::spawn(server.run(tx));

        let mut client = tokio::net::UnixStream::connect(&socket).await.unwrap();
        client
            .write_all(
                b"{\"type\":\"hello\"}\n{\"type\":\"forward-search\",\"sourcePath\":\"/a.tex\",\"line\":9}\n",
            )
            .await
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(event, Event::ForwardSearch { line: 9, .. }));
    }
}
