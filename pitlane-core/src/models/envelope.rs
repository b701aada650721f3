//! Response envelopes.
//!
//! Every response nests its payload as `{"MRData": {"<Table>": {...}}}`. The
//! table key differs per resource; the field names below are the API's own
//! and are matched case-sensitively. Unknown fields (`xmlns`, `series`,
//! `limit`, ...) are ignored.

use serde::{Deserialize, Serialize};

use super::driver::{ConstructorTeam, Driver};
use super::race::Race;
use super::standings::StandingEntry;

/// The top-level `MRData` container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The resource-specific payload.
    #[serde(rename = "MRData")]
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps a payload.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// `MRData` of a driver query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverData {
    /// The driver table.
    #[serde(rename = "DriverTable")]
    pub driver_table: DriverTable,
}

/// `DriverTable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverTable {
    /// Matching drivers.
    #[serde(rename = "Drivers")]
    pub drivers: Vec<Driver>,
}

/// Response of `/{season}/drivers.json` and `/current/drivers/{id}.json`.
pub type DriverResponse = Envelope<DriverData>;

impl DriverResponse {
    /// The drivers in response order.
    pub fn into_drivers(self) -> Vec<Driver> {
        self.data.driver_table.drivers
    }
}

// ============================================================================
// Standings
// ============================================================================

/// `MRData` of a standings query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsData {
    /// The standings table.
    #[serde(rename = "StandingsTable")]
    pub standings_table: StandingsTable,
}

/// `StandingsTable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsTable {
    /// One list per requested round; empty before the first race.
    #[serde(rename = "StandingsLists")]
    pub standings_lists: Vec<StandingsList>,
}

/// Standings after one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsList {
    /// Ranked drivers.
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Vec<StandingEntry>,
}

/// Response of `/{season}/driverStandings.json`.
pub type StandingsResponse = Envelope<StandingsData>;

impl StandingsResponse {
    /// The latest driver standings, empty if none are published yet.
    pub fn into_standings(self) -> Vec<StandingEntry> {
        self.data
            .standings_table
            .standings_lists
            .into_iter()
            .next()
            .map(|list| list.driver_standings)
            .unwrap_or_default()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// `MRData` of a constructor query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorData {
    /// The constructor table.
    #[serde(rename = "ConstructorTable")]
    pub constructor_table: ConstructorTable,
}

/// `ConstructorTable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorTable {
    /// Matching constructors.
    #[serde(rename = "Constructors")]
    pub constructors: Vec<ConstructorTeam>,
}

/// Response of `/{season}/constructors.json`.
pub type ConstructorResponse = Envelope<ConstructorData>;

impl ConstructorResponse {
    /// The constructors in response order.
    pub fn into_constructors(self) -> Vec<ConstructorTeam> {
        self.data.constructor_table.constructors
    }
}

// ============================================================================
// Races
// ============================================================================

/// `MRData` of a race query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceData {
    /// The race table.
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

/// `RaceTable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceTable {
    /// Matching races.
    #[serde(rename = "Races")]
    pub races: Vec<Race>,
}

/// Response of `/{season}.json` and `/current/{round}.json`.
pub type RaceResponse = Envelope<RaceData>;

impl RaceResponse {
    /// The races in response order.
    pub fn into_races(self) -> Vec<Race> {
        self.data.race_table.races
    }
}
