//! SyncTeX round trips between the pdf tab and Neovim.

use std::path::{Path, PathBuf};

use arview_common::{TabId, TabKind};
use arview_platform::{NvimClient, PdfLocation, SyncTex, NVIM_SOCKET};
use arview_webview::ViewId;
use serde_json::{json, Value};

use super::core::ArviewApp;
use super::types::AppCommand;

/// `{page, x, y}` from an inverse search click.
fn click_location(payload: &Value) -> Option<PdfLocation> {
    let page = payload.get("page").and_then(Value::as_u64)?;
    Some(PdfLocation {
        page: u32::try_from(page).ok()?,
        x: payload.get("x").and_then(Value::as_f64)?,
        y: payload.get("y").and_then(Value::as_f64)?,
    })
}

impl ArviewApp {
    fn pdf_path(&self, tab: TabId) -> Option<PathBuf> {
        self.coordinator
            .tabs()
            .tab(tab)
            .filter(|t| t.kind == TabKind::Pdf)
            .map(|t| PathBuf::from(t.target()))
    }

    /// A click in a pdf tab: find the source line and open it in Neovim.
    pub(super) fn inverse_search(&mut self, tab: TabId, payload: &Value) {
        let Some(pdf) = self.pdf_path(tab) else {
            tracing::debug!(%tab, "inverse search outside a pdf tab");
            return;
        };
        let Some(click) = click_location(payload) else {
            tracing::warn!(%tab, "malformed inverse search request");
            return;
        };
        let Some(runtime) = &self.tokio_runtime else {
            return;
        };
        runtime.spawn(async move {
            let source = match SyncTex::default().edit(&pdf, click.page, click.x, click.y).await {
                Ok(Some(source)) => source,
                Ok(None) => {
                    tracing::info!(pdf = %pdf.display(), page = click.page, "no source for click");
                    return;
                }
                Err(e) => {
                    tracing::warn!("synctex edit failed: {e}");
                    return;
                }
            };
            if let Err(e) = NvimClient::new(NVIM_SOCKET)
                .jump_to(&source.file, source.line, source.column)
                .await
            {
                tracing::warn!("neovim jump failed: {e}");
            }
        });
    }

    /// An editor asked to show `source:line` in the pdf.
    pub(super) fn forward_search(&mut self, source: PathBuf, line: u32) {
        let tabs = self.coordinator.tabs();
        let Some(pdf) = tabs.first_pdf_tab().and_then(|id| self.pdf_path(id)) else {
            tracing::debug!(source = %source.display(), "forward search without a pdf tab");
            return;
        };
        let Some(runtime) = &self.tokio_runtime else {
            return;
        };
        let tx = self.cmd_tx.clone();
        runtime.spawn(async move {
            match SyncTex::default().view(&pdf, &source, line, 0).await {
                Ok(Some(location)) => {
                    let _ = tx.send(AppCommand::SyncTexScroll { pdf, location });
                }
                Ok(None) => tracing::info!(source = %source.display(), line, "no pdf location"),
                Err(e) => tracing::warn!("synctex view failed: {e}"),
            }
        });
    }

    /// Bring the pdf tab forward and scroll it to `location`.
    pub(super) fn scroll_pdf_to(&mut self, pdf: &Path, location: PdfLocation) {
        let target = pdf.display().to_string();
        let Some(tab) = self.coordinator.tabs().find_document(&target) else {
            return;
        };
        self.with_host(|c, host| c.tabs_mut().switch_to_tab(tab, host));
        self.send_ipc(
            ViewId::Tab(tab),
            "synctex-scroll",
            json!({ "page": location.page, "x": location.x, "y": location.y }),
        );
    }
}
