// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Pitlane Fetch
//!
//! Resilient HTTP fetching and typed queries for the Formula 1 statistics
//! API.
//!
//! ## Fetching
//!
//! - [`fetcher::ResilientFetcher`] - GET with bounded retry and typed decoding
//! - [`retry::RetryPolicy`] - attempt count and delay between attempts
//! - [`settings::FetchSettings`] - base URL, attempts, timeouts
//!
//! ## Host APIs
//!
//! The [`host`] module provides the network seam:
//!
//! - [`host::http`] - reqwest-backed transport
//! - [`host::stub`] - scripted in-memory transport
//!
//! ## Queries
//!
//! [`api::F1Api`] wraps the fetcher with one method per resource.
//!
//! ## Example
//!
//! ```ignore
//! use pitlane_core::Season;
//! use pitlane_fetch::{F1Api, ResilientFetcher};
//!
//! let api = F1Api::new(ResilientFetcher::new()?);
//! let ranked = api.ranked_drivers(Season::Current).await?;
//! ```

pub mod api;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod retry;
pub mod settings;

// Re-export key types at crate root

// Errors
pub use error::{AttemptError, ConfigError, FetchFailure, ParseError, StatusError, TransportError};

// Host APIs
pub use host::{HttpClient, RawResponse, StubTransport, Transport};

// Fetching
pub use api::F1Api;
pub use fetcher::{ResilientFetcher, ResilientFetcherBuilder};
pub use retry::{RetryExhausted, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use settings::{FetchSettings, DEFAULT_BASE_URL};
