//! Fetch settings.
//!
//! Everything the fetcher needs to know: where the API lives, how many
//! attempts to make, how long each may take and how long to wait between
//! them.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::host::http::DEFAULT_TIMEOUT;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

/// Base address of the statistics API.
pub const DEFAULT_BASE_URL: &str = "https://ergast.com/api/f1";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// API base address, without a trailing slash.
    pub base_url: String,
    /// Maximum attempts per retrieval.
    pub max_attempts: u32,
    /// Timeout for a single attempt.
    pub timeout: Duration,
    /// Delay between attempts; zero retries immediately.
    pub retry_delay: Duration,
    /// Double the delay after every failed attempt.
    pub exponential_backoff: bool,
    /// Cap for the delay between attempts.
    pub max_retry_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            retry_delay: Duration::ZERO,
            exponential_backoff: false,
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

impl FetchSettings {
    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the attempt count.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables capped exponential backoff starting at `base`.
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.retry_delay = base;
        self.exponential_backoff = true;
        self
    }

    /// The retry policy these settings describe.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
            .with_base_delay(self.retry_delay)
            .with_exponential_backoff(self.exponential_backoff)
            .with_max_delay(self.max_retry_delay)
    }

    /// Validates the base URL and returns it without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the base URL is an
    /// absolute `http` or `https` URL without query or fragment.
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(self.base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}
