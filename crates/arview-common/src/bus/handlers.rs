use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::errors::BusError;

/// Outcome of a single handler invocation.
pub type HandlerResult = Result<Value, String>;

type Handler = Arc<dyn Fn(&Value, &str) -> HandlerResult + Send + Sync>;
type WildcardHandler = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Registration options for [`HandlerBus::on_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeOptions {
    /// Higher priorities run first. Ties keep registration order.
    pub priority: i32,
    /// Remove the handler after its first invocation.
    pub once: bool,
}

/// Token returned by a subscription; pass it to [`HandlerBus::off`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    event: String,
    id: u64,
}

impl Subscription {
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// Listener counts, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusStats {
    pub total_events: usize,
    pub total_handlers: usize,
    pub events: BTreeMap<String, usize>,
}

struct Registered {
    id: u64,
    priority: i32,
    once: bool,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    listeners: HashMap<String, Vec<Registered>>,
    wildcard: Vec<WildcardHandler>,
    next_id: u64,
}

/// Named, cloneable handler bus. Clones share the same listener table.
#[derive(Clone)]
pub struct HandlerBus {
    name: Arc<str>,
    inner: Arc<Mutex<Inner>>,
}

impl HandlerBus {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&Value, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_with(event, SubscribeOptions::default(), handler)
    }

    pub fn once<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&Value, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_with(
            event,
            SubscribeOptions {
                once: true,
                ..SubscribeOptions::default()
            },
            handler,
        )
    }

    pub fn on_with<F>(&self, event: &str, options: SubscribeOptions, handler: F) -> Subscription
    where
        F: Fn(&Value, &str) -> HandlerResult + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;

        let handlers = inner.listeners.entry(event.to_string()).or_default();
        handlers.push(Registered {
            id,
            priority: options.priority,
            once: options.once,
            handler: Arc::new(handler),
        });
        // Stable sort keeps registration order among equal priorities.
        handlers.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::trace!(bus = %self.name, event, id, "handler registered");
        Subscription {
            event: event.to_string(),
            id,
        }
    }

    /// Removes a handler. Returns `false` if it was already gone.
    pub fn off(&self, subscription: &Subscription) -> bool {
        let mut inner = self.lock();
        let Some(handlers) = inner.listeners.get_mut(&subscription.event) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|h| h.id != subscription.id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            inner.listeners.remove(&subscription.event);
        }
        removed
    }

    /// Listens to every emitted event, after the event's own handlers.
    pub fn on_any<F>(&self, handler: F)
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.lock().wildcard.push(Arc::new(handler));
    }

    /// Snapshots the handlers for `event`, unregistering `once` handlers so
    /// they cannot fire twice. Handlers run outside the lock.
    fn take_handlers(&self, event: &str) -> (Vec<Handler>, Vec<WildcardHandler>) {
        let mut inner = self.lock();
        let handlers = match inner.listeners.get_mut(event) {
            Some(registered) => {
                let snapshot = registered.iter().map(|r| r.handler.clone()).collect();
                registered.retain(|r| !r.once);
                if registered.is_empty() {
                    inner.listeners.remove(event);
                }
                snapshot
            }
            None => Vec::new(),
        };
        (handlers, inner.wildcard.clone())
    }

    /// Runs every handler for `event`. Handler failures are logged and do
    /// not stop the remaining handlers.
    pub fn emit(&self, event: &str, data: &Value) {
        for result in self.emit_collect(event, data) {
            if let Err(e) = result {
                tracing::warn!(bus = %self.name, event, error = %e, "handler failed");
            }
        }
    }

    /// Runs every handler for `event` and returns each outcome in
    /// priority order.
    pub fn emit_collect(&self, event: &str, data: &Value) -> Vec<Result<Value, BusError>> {
        let (handlers, wildcard) = self.take_handlers(event);

        let results = handlers
            .iter()
            .map(|handler| handler(data, event).map_err(BusError::Handler))
            .collect();

        for listener in &wildcard {
            listener(event, data);
        }
        results
    }

    /// Request/response against the highest-priority handler only.
    pub fn request(&self, event: &str, data: &Value) -> Result<Value, BusError> {
        let first = {
            let inner = self.lock();
            inner
                .listeners
                .get(event)
                .and_then(|handlers| handlers.first())
                .map(|r| r.handler.clone())
        };
        match first {
            Some(handler) => handler(data, event).map_err(BusError::Handler),
            None => Err(BusError::NoHandler(event.to_string())),
        }
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.lock().listeners.contains_key(event)
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.listeners.clear();
        inner.wildcard.clear();
    }

    pub fn stats(&self) -> BusStats {
        let inner = self.lock();
        let events: BTreeMap<String, usize> = inner
            .listeners
            .iter()
            .map(|(event, handlers)| (event.clone(), handlers.len()))
            .collect();
        BusStats {
            total_events: events.len(),
            total_handlers: events.values().sum(),
            events,
        }
    }
}

impl std::fmt::Debug for HandlerBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerBus")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}
