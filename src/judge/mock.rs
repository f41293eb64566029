//! Scripted judge transport for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::JudgeError;
use super::transport::JudgeTransport;

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with a well-formed `{"score": n}` body.
    Score(f64),
    /// Reply with arbitrary text, for exercising the reply parser.
    Text(String),
    /// Fail with a transport error.
    Fail,
    /// Never resolve, forcing the caller's abort timeout.
    Hang,
}

/// Queue-driven [`JudgeTransport`] double.
///
/// Replies are consumed front to back. When the queue runs dry the
/// transport either repeats a configured fallback reply or fails, so an
/// under-scripted test errors instead of hanging.
pub struct MockJudgeTransport {
    script: Mutex<VecDeque<MockReply>>,
    fallback: Option<MockReply>,
    calls: AtomicUsize,
    label: String,
}

impl MockJudgeTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicUsize::new(0),
            label: "mock".to_string(),
        }
    }

    /// Transport that plays `replies` in order, then fails.
    pub fn scripted(replies: impl IntoIterator<Item = MockReply>) -> Self {
        let transport = Self::new();
        transport.script.lock().extend(replies);
        transport
    }

    /// Transport that answers every call with the same reply.
    pub fn repeating(reply: MockReply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::new()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Appends one reply to the script.
    pub fn push(&self, reply: MockReply) {
        self.script.lock().push_back(reply);
    }

    /// Number of completion calls the transport has received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockJudgeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JudgeTransport for MockJudgeTransport {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .script
            .lock()
            .pop_front()
            .or_else(|| self.fallback.clone());

        match reply {
            Some(MockReply::Score(score)) => Ok(format!("{{\"score\": {score}}}")),
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail) | None => {
                Err(JudgeError::Transport("scripted failure".to_string()))
            }
            Some(MockReply::Hang) => std::future::pending().await,
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}
