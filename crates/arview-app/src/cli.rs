use std::path::{Path, PathBuf};

use arview_common::{Margins, TabKind};
use clap::Parser;

/// Page used when no file or URL was given.
pub const DEFAULT_URL: &str = "https://google.com";

/// arview: a tabbed PDF, Markdown and web viewer.
#[derive(Parser, Debug, Default)]
#[command(name = "arview", version, about)]
pub struct Args {
    /// File (.pdf, .md, .markdown) or http(s) URL to open.
    pub target: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overwrite the config file with the commented template and exit.
    #[arg(long)]
    pub reset_config: bool,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Quit when this process exits.
    #[arg(long)]
    pub ppid: Option<u32>,

    #[arg(long)]
    pub margin_top: Option<f64>,
    #[arg(long)]
    pub margin_right: Option<f64>,
    #[arg(long)]
    pub margin_bottom: Option<f64>,
    #[arg(long)]
    pub margin_left: Option<f64>,

    /// Window background as #RRGGBB.
    #[arg(long)]
    pub bg: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Config margins with any command-line overrides applied.
    pub fn margins(&self, base: Margins) -> Margins {
        Margins {
            top: self.margin_top.unwrap_or(base.top),
            right: self.margin_right.unwrap_or(base.right),
            bottom: self.margin_bottom.unwrap_or(base.bottom),
            left: self.margin_left.unwrap_or(base.left),
        }
    }

    pub fn has_margin_overrides(&self) -> bool {
        self.margin_top.is_some()
            || self.margin_right.is_some()
            || self.margin_bottom.is_some()
            || self.margin_left.is_some()
    }
}

/// What the window opens with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    Document(PathBuf),
    Url(String),
}

impl LaunchTarget {
    /// The line forwarded to a running instance.
    pub fn as_line(&self) -> String {
        match self {
            LaunchTarget::Document(path) => path.display().to_string(),
            LaunchTarget::Url(url) => url.clone(),
        }
    }
}

/// http(s) URLs pass through. Existing documents become absolute paths.
/// Anything else falls back to [`DEFAULT_URL`].
pub fn resolve_target(raw: Option<&str>, cwd: &Path) -> LaunchTarget {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return LaunchTarget::Url(DEFAULT_URL.to_string());
    };
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return LaunchTarget::Url(raw.to_string());
    }
    let path = Path::new(raw);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let is_document = TabKind::for_path(&path).is_some_and(TabKind::is_document);
    if is_document && path.is_file() {
        LaunchTarget::Document(std::fs::canonicalize(&path).unwrap_or(path))
    } else {
        tracing::warn!(target_arg = raw, "not an openable file, using default page");
        LaunchTarget::Url(DEFAULT_URL.to_string())
    }
}
