//! Overlay panels: command palette, quick list, workspace switcher, AI chat
//! and the tab bar.
//!
//! Each overlay is a transparent child webview above the tab surfaces. The
//! Rust side owns every piece of state; pages render what they are sent.

mod chat;
mod palette;
mod quicklist;
mod switcher;
mod tabbar;

use std::collections::{BTreeSet, HashMap};

use arview_common::Rect;
use arview_tabs::layout::{self, PinMode};
use arview_webview::ViewId;

use super::core::ArviewApp;
use super::webview_bridge::OverlayMessage;

pub(super) const BACKDROP: &str = "backdrop";
pub(super) const PALETTE: &str = "palette";
pub(super) const QUICKLIST: &str = "quicklist";
pub(super) const SWITCHER: &str = "switcher";
pub(super) const CHAT: &str = "chat";
pub(super) const TABBAR: &str = "tabbar";

/// Overlays that replace each other when shown.
const MODAL: [&str; 3] = [PALETTE, QUICKLIST, SWITCHER];

/// Visibility and per-overlay state.
#[derive(Debug, Default)]
pub(in crate::app_state) struct OverlayState {
    visible: BTreeSet<&'static str>,
    /// Surface serial at the time each overlay page was created.
    created: HashMap<&'static str, u64>,
    /// Titles deleted from the quick list since it was opened.
    pub quicklist_deleted: Vec<String>,
    pub chat_rect: Option<Rect>,
    pub chat_pin: PinMode,
    /// Offset of a fixed chat panel from the inner rect's top-right corner.
    pub chat_anchor: Option<(f64, f64)>,
}

impl OverlayState {
    pub fn new(tab_bar: bool) -> Self {
        let mut state = Self::default();
        if tab_bar {
            state.visible.insert(TABBAR);
        }
        state
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.contains(name)
    }

    /// Returns whether anything changed.
    pub fn set_visible(&mut self, name: &'static str, visible: bool) -> bool {
        if visible {
            self.visible.insert(name)
        } else {
            self.visible.remove(name)
        }
    }

    pub fn visible(&self) -> Vec<&'static str> {
        self.visible.iter().copied().collect()
    }

    pub fn created_at(&self, name: &str) -> u64 {
        self.created.get(name).copied().unwrap_or(0)
    }

    pub fn set_created_at(&mut self, name: &'static str, serial: u64) {
        self.created.insert(name, serial);
    }
}

impl ArviewApp {
    /// The window minus its margins.
    pub(in crate::app_state) fn inner_rect(&self) -> Rect {
        let (width, height) = self.window_size();
        layout::inner_rect(width, height, &self.effective_margins())
    }

    pub(in crate::app_state) fn overlay_rect(&self, name: &str) -> Rect {
        let (width, height) = self.window_size();
        let appearance = &self.config.appearance;
        match name {
            PALETTE => {
                let palette = &self.config.command_palette;
                layout::palette_rect(
                    width,
                    f64::from(palette.width),
                    f64::from(palette.height),
                    f64::from(palette.top_offset),
                )
            }
            QUICKLIST | SWITCHER => layout::centered_overlay_rect(
                width,
                height,
                appearance.width_percent,
                f64::from(appearance.overlay_height),
            ),
            CHAT => self
                .overlays
                .chat_rect
                .unwrap_or_else(|| layout::chat_initial_rect(self.inner_rect())),
            TABBAR => layout::tab_bar_rect(width, f64::from(self.config.tabs.height)),
            _ => Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Show `name`, hiding any other modal overlay, and send it its data.
    pub(in crate::app_state) fn show_overlay(&mut self, name: &'static str) {
        if MODAL.contains(&name) {
            for other in MODAL {
                if other != name {
                    self.hide_overlay(other);
                }
            }
        }
        self.ensure_overlay(name);
        self.overlays.set_visible(name, true);
        self.set_overlay_visible(name, true);
        self.refresh_overlay(name);
    }

    pub(in crate::app_state) fn hide_overlay(&mut self, name: &'static str) {
        if !self.overlays.set_visible(name, false) {
            return;
        }
        if name == PALETTE {
            self.send_ipc(ViewId::Overlay(PALETTE), "palette-hide", serde_json::Value::Null);
        }
        self.set_overlay_visible(name, false);
    }

    pub(in crate::app_state) fn toggle_overlay(&mut self, name: &'static str) {
        if self.overlays.is_visible(name) {
            self.hide_overlay(name);
        } else {
            self.show_overlay(name);
        }
    }

    /// Send an overlay the full state it renders.
    pub(in crate::app_state) fn refresh_overlay(&mut self, name: &'static str) {
        match name {
            PALETTE => self.send_palette_show(),
            QUICKLIST => self.send_quicklist("quicklist-show"),
            SWITCHER => self.send_switcher("workspace-switcher-show"),
            CHAT => self.send_chat_state(),
            TABBAR => self.send_tabs_update(),
            _ => {}
        }
    }

    /// Rebuild visible overlays that a newer tab surface has covered.
    pub(in crate::app_state) fn restack_overlays(&mut self) {
        for name in self.overlays.visible() {
            if self.overlays.created_at(name) >= self.surface_serial {
                continue;
            }
            if self.ensure_overlay(name) {
                self.set_overlay_visible(name, true);
                self.refresh_overlay(name);
            }
        }
    }

    /// Escape: close the topmost overlay. The quick list may ask for
    /// confirmation first.
    pub(in crate::app_state) fn close_top_overlay(&mut self) {
        if self.overlays.is_visible(PALETTE) {
            self.hide_overlay(PALETTE);
        } else if self.overlays.is_visible(QUICKLIST) {
            self.request_quicklist_close();
        } else if self.overlays.is_visible(SWITCHER) {
            self.hide_overlay(SWITCHER);
        } else if self.overlays.is_visible(CHAT) {
            self.hide_overlay(CHAT);
        }
    }

    pub(in crate::app_state) fn handle_overlay_message(&mut self, message: OverlayMessage) {
        let OverlayMessage {
            target,
            kind,
            payload,
        } = message;
        match target {
            PALETTE => self.handle_palette_message(&kind, &payload),
            QUICKLIST => self.handle_quicklist_message(&kind, &payload),
            SWITCHER => self.handle_switcher_message(&kind, &payload),
            CHAT => self.handle_chat_message(&kind, &payload),
            TABBAR => self.handle_tabbar_message(&kind, &payload),
            _ => tracing::warn!(target, kind, "message for unknown overlay"),
        }
    }
}
