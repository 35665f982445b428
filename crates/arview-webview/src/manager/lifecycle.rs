use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{self, ContentProvider};
use crate::errors::WebViewError;
use crate::ipc::IPC_INIT_SCRIPT;
use crate::view::ViewId;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Build a webview as a child of `window`, placed at `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        view: ViewId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, WebViewError> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_visible(config.visible)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(false)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events), view);
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events), view);
        builder = Self::attach_title_handler(builder, Arc::clone(&events), view);
        builder =
            Self::attach_navigation_handler(builder, Arc::clone(&events), view, config.local_only);
        builder = self.attach_custom_protocol(builder);

        let initial_url = match (&config.url, &config.html) {
            (Some(url), _) => {
                builder = builder.with_url(url);
                url.clone()
            }
            (None, Some(html)) => {
                builder = builder.with_html(html);
                "about:blank".to_string()
            }
            (None, None) => {
                builder = builder.with_html("<html><body></body></html>");
                "about:blank".to_string()
            }
        };

        let webview = builder.build_as_child(window)?;
        debug!(%view, url = %initial_url, "webview created");

        Ok(WebViewHandle {
            webview,
            view,
            current_url: initial_url,
            current_title: String::new(),
            visible: config.visible,
        })
    }

    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    pub fn content_provider(&self) -> Option<&Arc<ContentProvider>> {
        self.content_provider.as_ref()
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let Some(provider) = &self.content_provider else {
            return builder;
        };
        let cp = Arc::clone(provider);
        builder.with_custom_protocol(content::SCHEME.to_string(), move |_id, request| {
            let uri = request.uri().to_string();
            let path = content::request_path(&uri);
            match cp.resolve(path) {
                Some((mime, data)) => respond(200, mime.as_ref(), data.into_owned()),
                None => {
                    warn!(path = %path, "custom protocol: not found");
                    respond(404, "text/plain", b"Not Found".to_vec())
                }
            }
        })
    }
}

fn respond(status: u16, mime: &str, body: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", content::ORIGIN)
        .body(Cow::Owned(body))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&[])))
}
