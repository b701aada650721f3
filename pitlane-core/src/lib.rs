// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

//! # Pitlane Core
//!
//! Core types and response contracts for Pitlane.
//!
//! This crate holds everything that does not touch the network:
//!
//! - Domain models decoded from the statistics API (drivers, constructors,
//!   standings, races)
//! - The `MRData` response envelopes
//! - Resource paths
//! - The driver/standings join and display formatting
//!
//! ## Key Types
//!
//! ### Entities
//! - [`Driver`] - A driver entered in a season
//! - [`ConstructorTeam`] - A team entered in a season
//! - [`StandingEntry`] - One row of the driver standings
//! - [`Race`] - A race with its circuit and weekend sessions
//!
//! ### Views
//! - [`RankedDriver`] - A driver joined with its ranking
//! - [`RaceCalendar`] - The races of a season, indexed by round
//!
//! ### Addressing
//! - [`Season`] - A year or `current`
//! - [`Resource`] - A resource path

pub mod error;
pub mod format;
pub mod models;
pub mod resource;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Entities
    Circuit,
    ConstructorTeam,
    Driver,
    Location,
    Race,
    Session,
    SessionKind,
    StandingEntry,
    // Views
    RaceCalendar,
    RankedDriver,
    Ranking,
    find_standing,
    rank_drivers,
    // Envelopes
    ConstructorResponse,
    DriverResponse,
    Envelope,
    RaceResponse,
    StandingsResponse,
    // Addressing
    FIRST_SEASON,
    Season,
    parse_driver_id,
    parse_round,
};

pub use format::{format_clock, format_date, format_points};
pub use resource::Resource;
