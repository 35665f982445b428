use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::broadcast;

use crate::id::{TabId, WorkspaceId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ConfigReloaded,
    TabOpened(TabId),
    TabClosed(TabId),
    TabActivated(TabId),
    WorkspaceSwitched(WorkspaceId),
    FileChanged(PathBuf),
    ForwardSearch { source_path: PathBuf, line: u32 },
    Shutdown,
    #[serde(other)]
    Unknown,
}

/// App-wide broadcast of [`Event`] values.
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// A sender for producers that live on other tasks.
    pub fn sender(&self) -> broadcast::Sender<Event> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::ConfigReloaded);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::ConfigReloaded));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn tab_events_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let tab = TabId(1);

        bus.publish(Event::TabOpened(tab));
        bus.publish(Event::TabActivated(tab));
        bus.publish(Event::TabClosed(tab));

        assert!(matches!(rx.recv().await.unwrap(), Event::TabOpened(id) if id == TabId(1)));
        assert!(matches!(rx.recv().await.unwrap(), Event::TabActivated(id) if id == TabId(1)));
        assert!(matches!(rx.recv().await.unwrap(), Event::TabClosed(id) if id == TabId(1)));
    }

    #[tokio::test]
    async fn forward_search_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::ForwardSearch {
            source_path: PathBuf::from("/doc/main.tex"),
            line: 42,
        });

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::ForwardSearch { line: 42, .. }));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
