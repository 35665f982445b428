//! Local content served through the `arview://` custom protocol.
//!
//! Viewer and overlay pages come from the assets directory. Opened
//! documents are served under `doc/<percent-encoded absolute path>`, but
//! only after the app has allowed that exact path.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use arview_common::TabKind;
use tracing::debug;

pub const SCHEME: &str = "arview";
pub const ORIGIN: &str = "arview://localhost";

const DOC_PREFIX: &str = "doc/";

/// URL of the bytes of an allowed document.
pub fn document_asset_url(path: &str) -> String {
    format!("{ORIGIN}/{DOC_PREFIX}{}", urlencoding::encode(path))
}

/// Viewer page for a document tab. Web tabs load their URL directly.
pub fn viewer_url(kind: TabKind, target: &str) -> String {
    match kind {
        TabKind::Web => target.to_string(),
        TabKind::Pdf | TabKind::Markdown => format!(
            "{ORIGIN}/viewer/{}.html?file={}",
            kind.as_str(),
            urlencoding::encode(&document_asset_url(target))
        ),
    }
}

pub fn overlay_url(name: &str) -> String {
    format!("{ORIGIN}/overlays/{name}.html")
}

/// Strip the scheme and host from a custom-protocol request URI.
///
/// WebView2 rewrites `arview://localhost/x` to `http://arview.localhost/x`.
pub fn request_path(uri: &str) -> &str {
    let rest = uri
        .strip_prefix("arview://localhost/")
        .or_else(|| uri.strip_prefix("arview://localhost"))
        .or_else(|| uri.strip_prefix("http://arview.localhost/"))
        .or_else(|| uri.strip_prefix("arview:///"))
        .or_else(|| uri.strip_prefix("arview://"))
        .unwrap_or("");
    rest.split(['?', '#']).next().unwrap_or("")
}

/// Resolves `arview://` request paths to bytes and a MIME type.
pub struct ContentProvider {
    base_dir: PathBuf,
    overrides: HashMap<String, (String, Vec<u8>)>,
    documents: RwLock<HashSet<PathBuf>>,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
            documents: RwLock::new(HashSet::new()),
        }
    }

    /// Register an in-memory asset.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Let pages fetch `path` through [`document_asset_url`].
    pub fn allow_document(&self, path: impl Into<PathBuf>) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(path.into());
        }
    }

    pub fn is_document_allowed(&self, path: &Path) -> bool {
        self.documents
            .read()
            .map(|docs| docs.contains(path))
            .unwrap_or(false)
    }

    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');

        if let Some(encoded) = clean.strip_prefix(DOC_PREFIX) {
            return self.resolve_document(encoded);
        }

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((Cow::Borrowed(mime_from_extension(&file_path)), Cow::Owned(data)))
    }

    fn resolve_document(&self, encoded: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let decoded = urlencoding::decode(encoded).ok()?;
        let path = PathBuf::from(decoded.as_ref());
        if !self.is_document_allowed(&path) {
            debug!(path = %path.display(), "document not allowed");
            return None;
        }
        let data = std::fs::read(&path).ok()?;
        Some((Cow::Borrowed(mime_from_extension(&path)), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("md") | Some("markdown") => "text/markdown; charset=utf-8",
        Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
