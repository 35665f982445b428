use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use super::*;
use crate::errors::BusError;

fn recorder() -> (Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (log.clone(), log)
}

#[test]
fn handlers_run_in_priority_order() {
    let bus = HandlerBus::new("test");
    let (log, seen) = recorder();

    let l = log.clone();
    bus.on("open", move |_, _| {
        l.lock().unwrap().push("default".into());
        Ok(Value::Null)
    });
    let l = log.clone();
    bus.on_with(
        "open",
        SubscribeOptions {
            priority: 10,
            once: false,
        },
        move |_, _| {
            l.lock().unwrap().push("high".into());
            Ok(Value::Null)
        },
    );
    let l = log.clone();
    bus.on_with(
        "open",
        SubscribeOptions {
            priority: -5,
            once: false,
        },
        move |_, _| {
            l.lock().unwrap().push("low".into());
            Ok(Value::Null)
        },
    );

    bus.emit("open", &json!({}));
    assert_eq!(*seen.lock().unwrap(), vec!["high", "default", "low"]);
}

#[test]
fn equal_priority_keeps_registration_order() {
    let bus = HandlerBus::new("test");
    let (log, seen) = recorder();
    for name in ["a", "b", "c"] {
        let l = log.clone();
        bus.on("evt", move |_, _| {
            l.lock().unwrap().push(name.into());
            Ok(Value::Null)
        });
    }
    bus.emit("evt", &Value::Null);
    assert_eq!(*seen.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn once_handler_fires_once() {
    let bus = HandlerBus::new("test");
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    bus.once("ping", move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });

    bus.emit("ping", &Value::Null);
    bus.emit("ping", &Value::Null);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!bus.has_listeners("ping"));
}

#[test]
fn off_removes_handler() {
    let bus = HandlerBus::new("test");
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let sub = bus.on("ping", move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });
    assert_eq!(sub.event(), "ping");

    assert!(bus.off(&sub));
    assert!(!bus.off(&sub));
    bus.emit("ping", &Value::Null);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn failing_handler_does_not_stop_others() {
    let bus = HandlerBus::new("test");
    let count = Arc::new(AtomicUsize::new(0));

    bus.on_with(
        "evt",
        SubscribeOptions {
            priority: 1,
            once: false,
        },
        |_, _| Err("boom".into()),
    );
    let c = count.clone();
    bus.on("evt", move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });

    bus.emit("evt", &Value::Null);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn emit_collect_returns_all_results() {
    let bus = HandlerBus::new("test");
    bus.on("sum", |data, _| Ok(json!(data["a"].as_i64().unwrap_or(0) + 1)));
    bus.on("sum", |_, _| Err("nope".into()));

    let results = bus.emit_collect("sum", &json!({"a": 1}));
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(json!(2)));
    assert_eq!(results[1], Err(BusError::Handler("nope".into())));
}

#[test]
fn request_uses_first_handler() {
    let bus = HandlerBus::new("test");
    bus.on("who", |_, _| Ok(json!("second")));
    bus.on_with(
        "who",
        SubscribeOptions {
            priority: 3,
            once: false,
        },
        |_, _| Ok(json!("first")),
    );
    assert_eq!(bus.request("who", &Value::Null), Ok(json!("first")));
}

#[test]
fn request_without_handler_errors() {
    let bus = HandlerBus::new("test");
    assert_eq!(
        bus.request("missing", &Value::Null),
        Err(BusError::NoHandler("missing".into()))
    );
}

#[test]
fn wildcard_sees_every_event() {
    let bus = HandlerBus::new("test");
    let (log, seen) = recorder();
    bus.on_any(move |event, _| log.lock().unwrap().push(event.to_string()));

    bus.emit("a", &Value::Null);
    bus.emit("b", &Value::Null);
    assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
}

#[test]
fn handler_may_emit_reentrantly() {
    let bus = HandlerBus::new("test");
    let count = Arc::new(AtomicUsize::new(0));

    let inner_bus = bus.clone();
    bus.on("outer", move |_, _| {
        inner_bus.emit("inner", &Value::Null);
        Ok(Value::Null)
    });
    let c = count.clone();
    bus.on("inner", move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });

    bus.emit("outer", &Value::Null);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn stats_count_handlers() {
    let bus = HandlerBus::new("test");
    bus.on("a", |_, _| Ok(Value::Null));
    bus.on("a", |_, _| Ok(Value::Null));
    bus.on("b", |_, _| Ok(Value::Null));

    let stats = bus.stats();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.total_handlers, 3);
    assert_eq!(stats.events.get("a"), Some(&2));

    bus.clear();
    assert_eq!(bus.stats(), BusStats::default());
}

#[test]
fn channel_names() {
    assert_eq!(channel_name("palette", "execute"), "palette:execute");
}

#[test]
fn channel_send_reaches_target_handler() {
    let channels = ChannelManager::new(HandlerBus::new("channels"));
    let (log, seen) = recorder();
    channels.on("quicklist", "navigate", move |data, event| {
        log.lock()
            .unwrap()
            .push(format!("{event}={}", data.as_str().unwrap_or_default()));
        Ok(Value::Null)
    });

    channels.send("quicklist", "navigate", &json!("https://example.com"));
    channels.send("switcher", "navigate", &json!("ignored"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["quicklist:navigate=https://example.com"]
    );
}

#[tokio::test]
async fn channel_request_gets_response() {
    let channels = ChannelManager::new(HandlerBus::new("channels"));
    let responder = channels.clone();
    channels.on("chat", "config", move |_, _| {
        responder.respond("chat", "config", &json!({"hasKey": false}));
        Ok(Value::Null)
    });

    let response = channels
        .request("chat", "config", &Value::Null, DEFAULT_REQUEST_TIMEOUT)
        .await
        .unwrap();
    assert_eq!(response, json!({"hasKey": false}));
}

#[tokio::test]
async fn channel_request_times_out() {
    let channels = ChannelManager::new(HandlerBus::new("channels"));
    let result = channels
        .request("chat", "silent", &Value::Null, Duration::from_millis(20))
        .await;
    assert_eq!(result, Err(BusError::Timeout("chat:silent".into())));
    assert!(!channels.bus().has_listeners("chat:silent:response"));
}
