//! Graceful shutdown: save the session, destroy webviews, stop background work.

use std::time::Duration;

use arview_common::Event;

use super::core::ArviewApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl ArviewApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// The session is written before any surface goes away, and the runtime
    /// is stopped last so listeners can still notice the shutdown event.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.coordinator.persist_current();
        self.event_bus.publish(Event::Shutdown);

        self.watcher = None;

        if let Some(ref mut registry) = self.webviews {
            registry.destroy_all();
        }

        self.instance_rx = None;
        self.config_rx = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::test_support;
    use arview_common::Event;
    use std::path::Path;

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = test_support::app();

        app.shutdown();

        assert!(app.watcher.is_none());
        assert!(app.instance_rx.is_none());
        assert!(app.config_rx.is_none());
        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = test_support::app();

        app.shutdown();
        app.shutdown(); // second call must not panic

        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_publishes_and_persists() {
        let mut app = test_support::app();
        let mut rx = app.event_bus.subscribe();
        app.open_file(Path::new("/papers/a.pdf"));
        app.open_url("https://a.com");

        app.shutdown();

        assert!(matches!(rx.try_recv(), Ok(Event::WorkspaceSwitched(_))));
        assert!(matches!(rx.try_recv(), Ok(Event::Shutdown)));
        let workspace = app.coordinator.workspaces().active().unwrap();
        assert_eq!(workspace.tabs.len(), 2);
    }

    #[test]
    fn shutdown_with_runtime_stops_it() {
        let mut app = test_support::app();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (_tx, rx) = tokio::sync::watch::channel(arview_config::ArviewConfig::default());
        app.attach_runtime(runtime, rx);

        app.shutdown();

        assert!(app.tokio_runtime.is_none());
    }
}
