use wry::WebView;

use crate::errors::WebViewError;
use crate::view::ViewId;

/// A live webview and what we last told it to show.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) view: ViewId,
    pub(super) current_url: String,
    pub(super) current_title: String,
    pub(super) visible: bool,
}

impl WebViewHandle {
    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), WebViewError> {
        self.current_url = url.to_string();
        Ok(self.webview.load_url(url)?)
    }

    pub fn load_html(&mut self, html: &str) -> Result<(), WebViewError> {
        self.current_url = "about:blank".to_string();
        Ok(self.webview.load_html(html)?)
    }

    pub fn reload(&self) -> Result<(), WebViewError> {
        Ok(self.webview.reload()?)
    }

    pub fn evaluate_script(&self, js: &str) -> Result<(), WebViewError> {
        Ok(self.webview.evaluate_script(js)?)
    }

    /// Deliver a message to the page's `window.arview.ipc.on(kind)` handler.
    pub fn send_ipc(&self, kind: &str, payload: &serde_json::Value) -> Result<(), WebViewError> {
        let script = crate::ipc::js_dispatch_message(kind, payload);
        self.evaluate_script(&script)
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), WebViewError> {
        Ok(self.webview.set_bounds(bounds)?)
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), WebViewError> {
        self.webview.set_visible(visible)?;
        self.visible = visible;
        Ok(())
    }

    pub fn focus(&self) -> Result<(), WebViewError> {
        Ok(self.webview.focus()?)
    }

    pub fn focus_parent(&self) -> Result<(), WebViewError> {
        Ok(self.webview.focus_parent()?)
    }

    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    pub fn set_url(&mut self, url: String) {
        self.current_url = url;
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}
