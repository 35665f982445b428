//! Polling of background channels and webview events.

use std::time::Instant;

use arview_common::Event;
use arview_tabs::TabEvent;
use tokio::sync::broadcast::error::TryRecvError;
use winit::event_loop::ActiveEventLoop;

use super::core::ArviewApp;
use super::types::{AppCommand, POLL_INTERVAL};

impl ArviewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_once();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }

    pub(super) fn poll_once(&mut self) {
        self.poll_commands();
        self.poll_config();
        self.poll_instance();
        self.poll_bus();
        self.poll_webview_events();
        self.flush_tab_events();
    }

    fn poll_commands(&mut self) {
        while let Ok(command) = self.cmd_rx.try_recv() {
            match command {
                AppCommand::FileChanged(path) => self.reload_document(path),
                AppCommand::ChatReply(result) => self.handle_chat_reply(result),
                AppCommand::ChatModels { provider, result } => {
                    self.handle_chat_models(provider, result)
                }
                AppCommand::SyncTexScroll { pdf, location } => self.scroll_pdf_to(&pdf, location),
                AppCommand::ParentExited => {
                    tracing::info!("parent process gone, exiting");
                    self.should_exit = true;
                }
            }
        }
    }

    fn poll_config(&mut self) {
        let Some(rx) = self.config_rx.as_mut() else {
            return;
        };
        if !rx.has_changed().unwrap_or(false) {
            return;
        }
        let config = rx.borrow_and_update().clone();
        self.apply_config(config);
    }

    fn poll_instance(&mut self) {
        let mut targets = Vec::new();
        if let Some(rx) = self.instance_rx.as_mut() {
            while let Ok(line) = rx.try_recv() {
                targets.push(line);
            }
        }
        for line in targets {
            tracing::info!(target_line = %line, "target forwarded from another launch");
            self.open_target(&line);
        }
    }

    fn poll_bus(&mut self) {
        loop {
            match self.bus_rx.try_recv() {
                Ok(Event::ForwardSearch { source_path, line }) => {
                    self.forward_search(source_path, line)
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event bus lagged");
                }
                Err(_) => break,
            }
        }
    }

    /// Publish tab changes and refresh everything that shows them.
    fn flush_tab_events(&mut self) {
        let events = self.coordinator.tabs_mut().drain_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            let published = match event {
                TabEvent::Opened(id) => Event::TabOpened(id),
                TabEvent::Closed(id) => Event::TabClosed(id),
                TabEvent::Activated(id) => Event::TabActivated(id),
                TabEvent::TitleChanged(..) => continue,
            };
            self.event_bus.publish(published);
        }
        self.send_tabs_update();
        self.update_window_title();
        self.restack_overlays();
    }

    pub(super) fn window_title(&self) -> String {
        match self.coordinator.tabs().active_tab() {
            Some(tab) => format!("{} - arview", tab.display_title()),
            None => "arview".to_string(),
        }
    }

    fn update_window_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.window_title());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support;
    use crate::app_state::overlays::TABBAR;
    use arview_config::ArviewConfig;
    use arview_webview::ViewId;

    #[test]
    fn parent_exit_stops_the_app() {
        let mut app = test_support::app();
        app.cmd_tx.send(AppCommand::ParentExited).unwrap();
        app.poll_once();
        assert!(app.should_exit);
    }

    #[test]
    fn tab_events_reach_bus_and_tab_bar() {
        let mut config = ArviewConfig::default();
        config.tabs.show = true;
        let mut app = test_support::app_with(config);
        let mut rx = app.event_bus.subscribe();

        app.open_url("https://a.com");
        app.poll_once();

        assert!(matches!(rx.try_recv(), Ok(Event::TabOpened(_))));
        assert!(matches!(rx.try_recv(), Ok(Event::TabActivated(_))));
        let sent = app.mailbox.pending(ViewId::Overlay(TABBAR));
        assert_eq!(sent.last().map(|(kind, _)| kind.as_str()), Some("tabs-update"));
        assert_eq!(app.window_title(), "https://a.com - arview");
    }

    #[test]
    fn forwarded_targets_open() {
        let mut app = test_support::app();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        app.instance_rx = Some(rx);
        tx.send("https://b.com".to_string()).unwrap();
        app.poll_once();
        assert_eq!(app.coordinator.tabs().active_tab().unwrap().target(), "https://b.com");
    }

    #[test]
    fn live_config_is_applied() {
        let mut app = test_support::app();
        let (tx, rx) = tokio::sync::watch::channel(ArviewConfig::default());
        app.config_rx = Some(rx);

        let mut config = ArviewConfig::default();
        config.session.max_closed_tabs = 3;
        tx.send(config).unwrap();
        app.poll_once();

        assert_eq!(app.config.session.max_closed_tabs, 3);
        assert_eq!(app.coordinator.tabs().closed_tabs().capacity(), 3);
    }

    #[test]
    fn empty_window_title() {
        assert_eq!(test_support::app().window_title(), "arview");
    }
}
