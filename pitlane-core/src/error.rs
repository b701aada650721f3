//! Core error types for Pitlane.

use thiserror::Error;

/// Core error type for Pitlane operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Season is neither a four-digit year nor `current`.
    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    /// Round is not a positive integer.
    #[error("Invalid round: {0}")]
    InvalidRound(String),

    /// Driver identifier is empty or contains characters the API never uses.
    #[error("Invalid driver id: {0}")]
    InvalidDriverId(String),
}
