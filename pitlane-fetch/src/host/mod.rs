//! Host APIs for network access.
//!
//! The fetcher talks to the network only through the [`Transport`] trait:
//!
//! - [`http`] - reqwest-backed transport with tracing and timeouts
//! - [`stub`] - in-memory transport that replays scripted responses

pub mod http;
pub mod stub;

use async_trait::async_trait;

use crate::error::TransportError;

// Re-export key types
pub use http::HttpClient;
pub use stub::StubTransport;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET request.
///
/// Implementations make exactly one network exchange per call and never
/// retry on their own; retrying is the fetcher's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`, returning status and body for any HTTP response.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}
