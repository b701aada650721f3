//! In-memory transport that replays scripted responses.
//!
//! Used by tests and by callers that want to exercise the fetcher without a
//! network. Responses can be queued in order or pinned to a URL suffix.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RawResponse, Transport};
use crate::error::TransportError;

type Reply = Result<RawResponse, TransportError>;

/// Scripted [`Transport`] that records every requested URL.
#[derive(Debug, Default)]
pub struct StubTransport {
    queue: Mutex<VecDeque<Reply>>,
    routes: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    /// Creates a stub with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply; queued replies are consumed in order.
    #[must_use]
    pub fn then(self, reply: Reply) -> Self {
        lock(&self.queue).push_back(reply);
        self
    }

    /// Queues a `200 OK` with `body`.
    #[must_use]
    pub fn then_ok(self, body: impl Into<String>) -> Self {
        self.then(Ok(RawResponse::ok(body)))
    }

    /// Queues a response with the given status and empty body.
    #[must_use]
    pub fn then_status(self, status: u16) -> Self {
        self.then(Ok(RawResponse::new(status, "")))
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn then_fail(self, error: TransportError) -> Self {
        self.then(Err(error))
    }

    /// Answers every request whose URL ends with `suffix` with `reply`.
    ///
    /// Routes are consulted only when the queue is empty.
    #[must_use]
    pub fn route(self, suffix: impl Into<String>, reply: Reply) -> Self {
        lock(&self.routes).push((suffix.into(), reply));
        self
    }

    /// Number of requests served so far.
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        lock(&self.requests).push(url.to_string());

        if let Some(reply) = lock(&self.queue).pop_front() {
            return reply;
        }

        lock(&self.routes)
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map_or_else(
                || Err(TransportError::Connect(format!("no scripted reply for {url}"))),
                |(_, reply)| reply.clone(),
            )
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_routes() {
        let stub = StubTransport::new()
            .then_status(500)
            .route("/a.json", Ok(RawResponse::ok("a")));

        assert_eq!(stub.get("http://x/a.json").await.unwrap().status, 500);
        assert_eq!(stub.get("http://x/a.json").await.unwrap().body, "a");
        assert!(stub.get("http://x/b.json").await.is_err());
        assert_eq!(stub.calls(), 3);
    }
}
