use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("process error: {0}")]
    ProcessError(String),

    #[error("socket error: {0}")]
    SocketError(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures raised by the in-process handler bus and channel layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    #[error("no handler for request: {0}")]
    NoHandler(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    #[error("handler failed: {0}")]
    Handler(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ArviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("workspace error: {0}")]
    Workspace(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
