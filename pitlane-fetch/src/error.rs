//! Fetch error types.
//!
//! Every failed attempt is classified as one of [`TransportError`],
//! [`StatusError`] or [`ParseError`]. The retry loop treats all three the
//! same way; once the attempts are used up the caller gets a
//! [`FetchFailure`] holding the last one.

use thiserror::Error;

// ============================================================================
// Transport Error
// ============================================================================

/// The request could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not reach the server (DNS, refused connection, TLS).
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request or the body read timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The URL could not be requested.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout(message)
        } else if err.is_connect() {
            TransportError::Connect(message)
        } else if err.is_builder() {
            TransportError::InvalidUrl(message)
        } else {
            TransportError::Request(message)
        }
    }
}

// ============================================================================
// Status Error
// ============================================================================

/// The server answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP error! Status: {status}")]
pub struct StatusError {
    /// The HTTP status code.
    pub status: u16,
}

impl StatusError {
    /// Creates a status error.
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// The canonical reason phrase, if the code has one.
    pub fn reason(&self) -> Option<&'static str> {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
    }

    /// Returns true for 5xx codes.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

// ============================================================================
// Parse Error
// ============================================================================

/// The body did not decode into the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid response body: {message}")]
pub struct ParseError {
    /// What the decoder rejected.
    pub message: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Attempt Error
// ============================================================================

/// Why a single attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The request did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server returned a non-success status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The body was malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AttemptError {
    /// A short name for the failure class, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Parse(_) => "parse",
        }
    }
}

// ============================================================================
// Fetch Failure
// ============================================================================

/// A retrieval that failed on every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} failed after {attempts} attempt(s): {last}")]
pub struct FetchFailure {
    /// Resource path that was requested.
    pub path: String,
    /// Number of attempts made.
    pub attempts: u32,
    /// The cause of the final attempt's failure.
    #[source]
    pub last: AttemptError,
}

impl FetchFailure {
    /// The cause of the final attempt's failure.
    pub fn last_cause(&self) -> &AttemptError {
        &self.last
    }
}

// ============================================================================
// Config Error
// ============================================================================

/// The fetcher could not be constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
