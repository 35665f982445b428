//! Minimal msgpack-rpc client for a listening Neovim.
//!
//! Only `nvim_command` is needed: inverse search opens the source file at a
//! line and optionally moves to a column.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use arview_common::PlatformError;
use rmpv::Value;
use tracing::{debug, info};

/// Socket Neovim is expected to listen on (`nvim --listen /tmp/nvim-arview.sock`).
pub const NVIM_SOCKET: &str = "/tmp/nvim-arview.sock";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Encode a msgpack-rpc request `[0, msgid, method, params]`.
pub fn encode_request(msgid: u32, method: &str, params: Vec<Value>) -> Result<Vec<u8>, PlatformError> {
    let request = Value::Array(vec![
        Value::from(0),
        Value::from(msgid),
        Value::from(method),
        Value::Array(params),
    ]);
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, &request)
        .map_err(|e| PlatformError::SocketError(format!("msgpack encode: {e}")))?;
    Ok(buf)
}

/// Interpret a decoded message. `None` when it is not the response to
/// `msgid` (notifications, other responses).
pub fn match_response(message: &Value, msgid: u32) -> Option<Result<Value, PlatformError>> {
    let parts = message.as_array()?;
    if parts.len() != 4 || parts[0].as_u64() != Some(1) || parts[1].as_u64() != Some(u64::from(msgid)) {
        return None;
    }
    if parts[2].is_nil() {
        Some(Ok(parts[3].clone()))
    } else {
        Some(Err(PlatformError::ProcessError(format!("neovim: {}", describe_error(&parts[2])))))
    }
}

fn describe_error(err: &Value) -> String {
    // Neovim sends `[type, message]`.
    match err.as_array() {
        Some(items) if items.len() == 2 => items[1]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| items[1].to_string()),
        _ => err.to_string(),
    }
}

/// Escape a path for use in an ex command.
fn escape_path(path: &Path) -> String {
    let mut out = String::new();
    for ch in path.display().to_string().chars() {
        if matches!(ch, ' ' | '\\' | '|' | '%' | '#' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub struct NvimClient {
    socket: PathBuf,
    next_id: AtomicU32,
}

impl Default for NvimClient {
    fn default() -> Self {
        Self::new(NVIM_SOCKET)
    }
}

impl NvimClient {
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// Run an ex command. Times out after 5 seconds.
    pub async fn command(&self, cmd: &str) -> Result<Value, PlatformError> {
        let msgid = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(msgid, cmd, "sending command to neovim");
        tokio::time::timeout(REQUEST_TIMEOUT, self.round_trip(msgid, cmd))
            .await
            .map_err(|_| PlatformError::Timeout(format!("neovim command: {cmd}")))?
    }

    /// Open `file` at `line`, then move to `column` when it is known.
    pub async fn jump_to(&self, file: &Path, line: u32, column: u32) -> Result<(), PlatformError> {
        self.command(&format!("edit +{line} {}", escape_path(file))).await?;
        if column > 0 {
            self.command(&format!("normal! {column}|")).await?;
        }
        info!(file = %file.display(), line, column, "jumped to source");
        Ok(())
    }

    #[cfg(unix)]
    async fn round_trip(&self, msgid: u32, cmd: &str) -> Result<Value, PlatformError> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let request = encode_request(msgid, "nvim_command", vec![Value::from(cmd)])?;
        let mut stream = tokio::net::UnixStream::connect(&self.socket)
            .await
            .map_err(|e| PlatformError::SocketError(format!("{}: {e}", self.socket.display())))?;
        stream
            .write_all(&request)
            .await
            .map_err(|e| PlatformError::SocketError(e.to_string()))?;

        let mut buf: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream
                .read(&mut chunk)
                .await
                .map_err(|e| PlatformError::SocketError(e.to_string()))?;
            if n == 0 {
                return Err(PlatformError::SocketError("neovim closed the connection".into()));
            }
            buf.extend_from_slice(&chunk[..n]);

            // Decode as many complete messages as the buffer holds.
            loop {
                let mut cursor = Cursor::new(buf.as_slice());
                let Ok(message) = rmpv::decode::read_value(&mut cursor) else {
                    break;
                };
                let used = usize::try_from(cursor.position()).unwrap_or(buf.len());
                buf.drain(..used);
                if let Some(result) = match_response(&message, msgid) {
                    return result;
                }
            }
        }
    }

    #[cfg(not(unix))]
    async fn round_trip(&self, _msgid: u32, _cmd: &str) -> Result<Value, PlatformError> {
        Err(PlatformError::NotSupported("neovim socket".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_layout() {
        let bytes = encode_request(7, "nvim_command", vec![Value::from("edit +3 a.tex")]).unwrap();
        let decoded = rmpv::decode::read_value(&mut bytes.as_slice()).unwrap();
        let parts = decoded.as_array().unwrap();
        assert_eq!(parts[0].as_u64(), Some(0));
        assert_eq!(parts[1].as_u64(), Some(7));
        assert_eq!(parts[2].as_str(), Some("nvim_command"));
        assert_eq!(parts[3].as_array().unwrap()[0].as_str(), Some("edit +3 a.tex"));
    }

    #[test]
    fn response_matching() {
        let ok = Value::Array(vec![1.into(), 4.into(), Value::Nil, Value::Nil]);
        assert!(matches!(match_response(&ok, 4), Some(Ok(Value::Nil))));
        assert!(match_response(&ok, 5).is_none());

        let notification = Value::Array(vec![2.into(), "redraw".into(), Value::Array(vec![])]);
        assert!(match_response(&notification, 4).is_none());

        let err = Value::Array(vec![
            1.into(),
            4.into(),
            Value::Array(vec![0.into(), "E492: Not an editor command".into()]),
            Value::Nil,
        ]);
        match match_response(&err, 4) {
            Some(Err(PlatformError::ProcessError(msg))) => assert!(msg.contains("E492")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn paths_are_escaped() {
        assert_eq!(escape_path(Path::new("/a b/c%.tex")), "/a\\ b/c\\%.tex");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_against_fake_server() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("nvim.sock");
        let listener = tokio::net::UnixListener::bind(&socket).unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let n = stream.read(&mut buf).await.unwrap();
            let request = rmpv::decode::read_value(&mut &buf[..n]).unwrap();
            let msgid = request.as_array().unwrap()[1].clone();

            let mut out = Vec::new();
            let notify = Value::Array(vec![2.into(), "redraw".into(), Value::Array(vec![])]);
            rmpv::encode::write_value(&mut out, &notify).unwrap();
            let response = Value::Array(vec![1.into(), msgid, Value::Nil, "done".into()]);
            rmpv::encode::write_value(&mut out, &response).unwrap();
            stream.write_all(&out).await.unwrap();
        });

        let client = NvimClient::new(&socket);
        let result = client.command("echo 'hi'").await.unwrap();
        assert_eq!(result.as_str(), Some("done"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_socket_is_socket_error() {
        let client = NvimClient::new("/tmp/arview-test-no-such-nvim.sock");
        let result = client.command("echo").await;
        assert!(matches!(result, Err(PlatformError::SocketError(_))));
    }
}
