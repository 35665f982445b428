use crate::view::ViewId;

#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    #[error("webview error: {0}")]
    Wry(#[from] wry::Error),

    #[error("no webview for {0}")]
    NotFound(ViewId),

    #[error("{0} already has a webview")]
    AlreadyExists(ViewId),
}

impl From<WebViewError> for arview_common::ArviewError {
    fn from(e: WebViewError) -> Self {
        arview_common::ArviewError::WebView(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arview_common::TabId;

    #[test]
    fn display() {
        assert_eq!(
            WebViewError::NotFound(ViewId::Tab(TabId(3))).to_string(),
            "no webview for tab-3"
        );
        assert_eq!(
            WebViewError::AlreadyExists(ViewId::Overlay("palette")).to_string(),
            "overlay:palette already has a webview"
        );
    }
}
