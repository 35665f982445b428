use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Space reserved around the inset view, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// What a tab renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Pdf,
    Markdown,
    Web,
}

impl TabKind {
    /// Classifies a launch target: URLs are web, known document
    /// extensions are pdf or markdown.
    pub fn for_target(target: &str) -> Option<TabKind> {
        let trimmed = target.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Some(TabKind::Web);
        }
        Self::for_path(Path::new(trimmed))
    }

    pub fn for_path(path: &Path) -> Option<TabKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(TabKind::Pdf),
            "md" | "markdown" => Some(TabKind::Markdown),
            _ => None,
        }
    }

    /// Documents anchor a workspace; web tabs are auxiliary.
    pub fn is_document(self) -> bool {
        matches!(self, TabKind::Pdf | TabKind::Markdown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Pdf => "pdf",
            TabKind::Markdown => "markdown",
            TabKind::Web => "web",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
