use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::oneshot;

use super::handlers::{HandlerBus, HandlerResult, Subscription};
use crate::errors::BusError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Builds the bus event name for a targeted message.
pub fn channel_name(target: &str, event: &str) -> String {
    format!("{target}:{event}")
}

fn response_name(target: &str, event: &str) -> String {
    format!("{target}:{event}:response")
}

/// Targeted messaging over a shared [`HandlerBus`].
#[derive(Debug, Clone)]
pub struct ChannelManager {
    bus: HandlerBus,
}

impl ChannelManager {
    pub fn new(bus: HandlerBus) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &HandlerBus {
        &self.bus
    }

    pub fn send(&self, target: &str, event: &str, data: &Value) {
        self.bus.emit(&channel_name(target, event), data);
    }

    pub fn on<F>(&self, target: &str, event: &str, handler: F) -> Subscription
    where
        F: Fn(&Value, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.bus.on(&channel_name(target, event), handler)
    }

    /// Answers a pending [`ChannelManager::request`].
    pub fn respond(&self, target: &str, event: &str, data: &Value) {
        self.bus.emit(&response_name(target, event), data);
    }

    /// Sends `event` to `target` and waits for the matching `respond`.
    pub async fn request(
        &self,
        target: &str,
        event: &str,
        data: &Value,
        timeout: Duration,
    ) -> Result<Value, BusError> {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Mutex::new(Some(tx)));

        let subscription = self.bus.once(&response_name(target, event), move |response, _| {
            if let Some(tx) = slot.lock().ok().and_then(|mut s| s.take()) {
                let _ = tx.send(response.clone());
            }
            Ok(Value::Null)
        });

        self.send(target, event, data);

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            _ => {
                self.bus.off(&subscription);
                Err(BusError::Timeout(channel_name(target, event)))
            }
        }
    }
}
