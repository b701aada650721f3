//! The resilient fetcher.
//!
//! One logical retrieval: GET `base_url + path`, require a 2xx status, decode
//! the body into the expected type, and retry the whole exchange under the
//! configured [`RetryPolicy`] if any of those steps fails.

use std::fmt;
use std::sync::Arc;

use pitlane_core::Resource;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{AttemptError, ConfigError, FetchFailure, ParseError, StatusError};
use crate::host::{HttpClient, Transport};
use crate::retry::RetryPolicy;
use crate::settings::FetchSettings;

// ============================================================================
// Resilient Fetcher
// ============================================================================

/// Issues GET requests against the statistics API with bounded retry.
///
/// Cloning is cheap; clones share the transport. Invocations are independent
/// and may run concurrently.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    base_url: String,
    retry: RetryPolicy,
}

impl ResilientFetcher {
    /// Creates a fetcher with default settings and the reqwest transport.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Creates a builder for customizing the fetcher.
    pub fn builder() -> ResilientFetcherBuilder {
        ResilientFetcherBuilder::new()
    }

    /// Creates a fetcher over an explicit transport.
    ///
    /// # Errors
    ///
    /// Fails if the base URL in `settings` is invalid.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        settings: &FetchSettings,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            base_url: settings.normalized_base_url()?,
            retry: settings.retry_policy(),
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The retry policy applied to every retrieval.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Absolute URL for an API-relative path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetches a typed resource.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] when every attempt failed.
    pub async fn fetch_resource<T>(&self, resource: &Resource) -> Result<T, FetchFailure>
    where
        T: DeserializeOwned,
    {
        self.fetch(&resource.path()).await
    }

    /// Fetches `path` and decodes the body as `T`.
    ///
    /// A success status with a body that does not decode as `T` counts as a
    /// failed attempt. The first attempt that decodes is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] carrying the last cause when every attempt
    /// failed.
    #[instrument(skip(self), fields(attempts = self.retry.attempts()))]
    pub async fn fetch<T>(&self, path: &str) -> Result<T, FetchFailure>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(path);

        self.retry
            .run(|attempt| {
                let url = url.as_str();
                async move {
                    debug!(attempt, url, "Fetching");
                    self.attempt::<T>(url).await
                }
            })
            .await
            .map_err(|exhausted| FetchFailure {
                path: path.to_string(),
                attempts: exhausted.attempts,
                last: exhausted.last_error,
            })
    }

    async fn attempt<T: DeserializeOwned>(&self, url: &str) -> Result<T, AttemptError> {
        let response = self.transport.get(url).await?;
        if !response.is_success() {
            return Err(StatusError::new(response.status).into());
        }

        let parsed = serde_json::from_str(&response.body).map_err(ParseError::from)?;
        Ok(parsed)
    }
}

impl fmt::Debug for ResilientFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResilientFetcher")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ResilientFetcher`].
#[derive(Default)]
pub struct ResilientFetcherBuilder {
    settings: FetchSettings,
    transport: Option<Arc<dyn Transport>>,
}

impl ResilientFetcherBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of attempts.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.settings.max_attempts = max_attempts;
        self
    }

    /// Sets the per-attempt timeout. Ignored when a transport is supplied.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets a fixed delay between attempts.
    pub fn retry_delay(mut self, delay: std::time::Duration) -> Self {
        self.settings.retry_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn exponential_backoff(mut self, enabled: bool) -> Self {
        self.settings.exponential_backoff = enabled;
        self
    }

    /// Uses `transport` instead of the reqwest client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the fetcher.
    ///
    /// # Errors
    ///
    /// Fails on an invalid base URL or if the HTTP client cannot be built.
    pub fn build(self) -> Result<ResilientFetcher, ConfigError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpClient::with_timeout(self.settings.timeout)?),
        };
        ResilientFetcher::with_transport(transport, &self.settings)
    }
}

impl fmt::Debug for ResilientFetcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResilientFetcherBuilder")
            .field("settings", &self.settings)
            .field("transport", &self.transport.as_ref().map(|_| "custom"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::host::{RawResponse, StubTransport};
    use pitlane_core::{DriverResponse, RaceResponse, Season};

    const VERSTAPPEN: &str = r#"{"MRData":{"DriverTable":{"Drivers":[{"driverId":"max_verstappen","givenName":"Max","familyName":"Verstappen","nationality":"Dutch"}]}}}"#;

    fn fetcher(stub: &Arc<StubTransport>, attempts: u32) -> ResilientFetcher {
        ResilientFetcher::builder()
            .base_url("https://api.test/f1")
            .max_attempts(attempts)
            .transport(stub.clone())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_attempt_success_makes_one_call() {
        let stub = Arc::new(StubTransport::new().then_ok(VERSTAPPEN));
        let f = fetcher(&stub, 3);

        let response: DriverResponse = f.fetch("/2024/drivers.json").await.unwrap();

        assert_eq!(response.into_drivers().len(), 1);
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.requests(), vec!["https://api.test/f1/2024/drivers.json"]);
    }

    #[tokio::test]
    async fn test_success_on_third_attempt() {
        let stub = Arc::new(
            StubTransport::new()
                .then_fail(TransportError::Connect("refused".into()))
                .then_status(503)
                .then_ok(VERSTAPPEN),
        );
        let f = fetcher(&stub, 3);

        let response: DriverResponse = f.fetch("/2024/drivers.json").await.unwrap();

        assert_eq!(response.into_drivers()[0].family_name, "Verstappen");
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_carries_last_cause() {
        let stub = Arc::new(
            StubTransport::new()
                .then_status(500)
                .then_fail(TransportError::Timeout("slow".into()))
                .then_status(502)
                .then_ok(VERSTAPPEN),
        );
        let f = fetcher(&stub, 3);

        let failure = f.fetch::<DriverResponse>("/2024/drivers.json").await.unwrap_err();

        assert_eq!(failure.attempts, 3);
        assert_eq!(failure.path, "/2024/drivers.json");
        assert_eq!(failure.last, AttemptError::Status(StatusError::new(502)));
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_failure() {
        let stub = Arc::new(StubTransport::new().then_ok("<html>busy</html>"));
        let f = fetcher(&stub, 1);

        let failure = f.fetch::<DriverResponse>("/2024/drivers.json").await.unwrap_err();

        assert!(matches!(failure.last, AttemptError::Parse(_)));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_retried() {
        let stub = Arc::new(
            StubTransport::new()
                .then_ok(r#"{"MRData":{}}"#)
                .then_ok(VERSTAPPEN),
        );
        let f = fetcher(&stub, 2);

        let response: DriverResponse = f.fetch("/2024/drivers.json").await.unwrap();

        assert_eq!(response.into_drivers().len(), 1);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_table_is_success() {
        let stub = Arc::new(
            StubTransport::new().then_ok(r#"{"MRData":{"RaceTable":{"season":"2031","Races":[]}}}"#),
        );
        let f = fetcher(&stub, 3);

        let response: RaceResponse = f
            .fetch_resource(&Resource::RaceCalendar(Season::Year(2031)))
            .await
            .unwrap();

        assert!(response.into_races().is_empty());
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.requests(), vec!["https://api.test/f1/2031.json"]);
    }

    #[tokio::test]
    async fn test_repeated_fetch_is_idempotent() {
        let stub = Arc::new(
            StubTransport::new().route("/drivers.json", Ok(RawResponse::ok(VERSTAPPEN))),
        );
        let f = fetcher(&stub, 3);

        let first: DriverResponse = f.fetch("/2024/drivers.json").await.unwrap();
        let second: DriverResponse = f.fetch("/2024/drivers.json").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let stub = Arc::new(StubTransport::new().then_status(404));
        let f = fetcher(&stub, 0);

        let failure = f.fetch::<DriverResponse>("/x.json").await.unwrap_err();

        assert_eq!(failure.attempts, 1);
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_url_for() {
        let stub = Arc::new(StubTransport::new());
        let f = fetcher(&stub, 1);
        assert_eq!(f.url_for("/current.json"), "https://api.test/f1/current.json");
        assert_eq!(f.url_for("current.json"), "https://api.test/f1/current.json");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ResilientFetcher::builder()
            .base_url("not a url")
            .transport(Arc::new(StubTransport::new()))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}
