//! A chat conversation with bounded history.
//!
//! The session is shared between the IPC handler and the task that awaits
//! the provider, so it takes `&self` and allows one request at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::{AiClient, AiError, Message};

/// Messages kept in the conversation.
pub const MAX_HISTORY: usize = 20;

const EMPTY_REPLY: &str = "(no content)";

#[derive(Default)]
pub struct ChatSession {
    history: Mutex<Vec<Message>>,
    busy: AtomicBool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Message> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }

    /// Append and trim. Returns the history after the push.
    fn push(&self, message: Message) -> Vec<Message> {
        let Ok(mut history) = self.history.lock() else {
            return vec![message];
        };
        history.push(message);
        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }
        history.clone()
    }

    /// Record `text`, ask `client` and record its reply.
    ///
    /// The user message stays in the history even when the request fails.
    pub async fn send(&self, client: &dyn AiClient, text: &str) -> Result<String, AiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::ApiError("Message is empty.".into()));
        }
        let _guard = BusyGuard::acquire(&self.busy).ok_or(AiError::Busy)?;

        let history = self.push(Message::user(text));
        debug!(history = history.len(), "sending chat message");

        let reply = match client.send_message(&history).await {
            Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                warn!("chat request failed: {e}");
                return Err(e);
            }
        };
        self.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}

/// Clears the busy flag on drop.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use async_trait::async_trait;

    struct Scripted(Result<&'static str, &'static str>);

    #[async_trait]
    impl AiClient for Scripted {
        async fn send_message(&self, _history: &[Message]) -> Result<String, AiError> {
            self.0
                .map(str::to_string)
                .map_err(|e| AiError::ApiError(e.to_string()))
        }

        async fn list_models(&self) -> Result<Vec<String>, AiError> {
            Ok(vec![])
        }
    }

    /// Replies with the history length it was given.
    struct Counting;

    #[async_trait]
    impl AiClient for Counting {
        async fn send_message(&self, history: &[Message]) -> Result<String, AiError> {
            Ok(history.len().to_string())
        }

        async fn list_models(&self) -> Result<Vec<String>, AiError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn records_both_sides() {
        let session = ChatSession::new();
        let reply = session.send(&Scripted(Ok("hi there")), " hi ").await.unwrap();
        assert_eq!(reply, "hi there");
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], Message::user("hi"));
        assert_eq!(history[1].role, Role::Assistant);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn blank_reply_is_placeholder() {
        let session = ChatSession::new();
        let reply = session.send(&Scripted(Ok("  ")), "q").await.unwrap();
        assert_eq!(reply, "(no content)");
    }

    #[tokio::test]
    async fn failure_keeps_user_message() {
        let session = ChatSession::new();
        let err = session.send(&Scripted(Err("boom")), "q").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(session.history(), vec![Message::user("q")]);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn history_is_capped() {
        let session = ChatSession::new();
        for i in 0..15 {
            let reply = session.send(&Counting, &format!("m{i}")).await.unwrap();
            assert!(reply.parse::<usize>().unwrap() <= MAX_HISTORY);
        }
        let history = session.history();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history[0], Message::user("m5"));
        assert_eq!(history[19], Message::assistant("20"));
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let session = ChatSession::new();
        assert!(session.send(&Scripted(Ok("x")), "   ").await.is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn busy_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = BusyGuard::acquire(&flag).unwrap();
        assert!(BusyGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
