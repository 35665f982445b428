/// Options for a new webview.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL (takes precedence over `html`).
    pub url: Option<String>,
    pub html: Option<String>,
    /// Transparent background; overlays use it.
    pub transparent: bool,
    pub visible: bool,
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Restrict navigation to local content. Overlays and viewers set it;
    /// web tabs browse freely.
    pub local_only: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            transparent: false,
            visible: true,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: false,
            local_only: false,
        }
    }
}

impl WebViewConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// A transparent, initially hidden overlay page.
    pub fn overlay(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            transparent: true,
            visible: false,
            local_only: true,
            ..Default::default()
        }
    }
}
