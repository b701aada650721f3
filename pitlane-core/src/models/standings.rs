//! Driver standings and the driver/standings join.
//!
//! The standings table nests a full driver object inside every entry; only
//! its identifier is kept so an entry can be matched against the season's
//! driver list.

use serde::{Deserialize, Serialize};

use super::driver::Driver;
use super::lenient;

// ============================================================================
// Standing Entry
// ============================================================================

/// One row of the driver standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    /// Identifier of the ranked driver.
    pub driver_id: String,
    /// 1-based rank.
    pub position: u32,
    /// Accumulated points, possibly fractional.
    pub points: f64,
    /// Race wins so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wins: Option<u32>,
}

impl StandingEntry {
    /// Creates an entry.
    pub fn new(driver_id: impl Into<String>, position: u32, points: f64) -> Self {
        Self {
            driver_id: driver_id.into(),
            position,
            points,
            wins: None,
        }
    }
}

#[derive(Deserialize)]
struct DriverRef {
    #[serde(rename = "driverId")]
    driver_id: String,
}

#[derive(Deserialize)]
struct WireStandingEntry {
    #[serde(deserialize_with = "lenient::number_u32")]
    position: u32,
    #[serde(deserialize_with = "lenient::number_f64")]
    points: f64,
    #[serde(default, deserialize_with = "lenient::number_opt_u32")]
    wins: Option<u32>,
    #[serde(rename = "Driver", alias = "driverId")]
    driver: DriverRefOrId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DriverRefOrId {
    Nested(DriverRef),
    Flat(String),
}

impl<'de> Deserialize<'de> for StandingEntry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireStandingEntry::deserialize(deserializer)?;
        let driver_id = match wire.driver {
            DriverRefOrId::Nested(d) => d.driver_id,
            DriverRefOrId::Flat(id) => id,
        };
        Ok(Self {
            driver_id,
            position: wire.position,
            points: wire.points,
            wins: wire.wins,
        })
    }
}

// ============================================================================
// Ranked Driver
// ============================================================================

/// Championship position and points attached to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranking {
    /// 1-based rank.
    pub position: u32,
    /// Accumulated points.
    pub points: f64,
}

impl From<&StandingEntry> for Ranking {
    fn from(entry: &StandingEntry) -> Self {
        Self {
            position: entry.position,
            points: entry.points,
        }
    }
}

/// A driver with its ranking, if the standings had one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDriver {
    /// The driver.
    pub driver: Driver,
    /// `None` when no standing entry matched the driver.
    pub ranking: Option<Ranking>,
}

impl RankedDriver {
    /// Returns true when no ranking is available.
    pub fn is_unranked(&self) -> bool {
        self.ranking.is_none()
    }
}

/// Looks up the standing entry for `driver_id` by exact identifier match.
pub fn find_standing<'a>(
    standings: &'a [StandingEntry],
    driver_id: &str,
) -> Option<&'a StandingEntry> {
    standings.iter().find(|s| s.driver_id == driver_id)
}

/// Joins drivers with their standings and orders them by position.
///
/// Drivers without a matching entry keep their list order after all ranked
/// drivers. Entries that match no driver are ignored.
pub fn rank_drivers(drivers: Vec<Driver>, standings: &[StandingEntry]) -> Vec<RankedDriver> {
    let mut ranked: Vec<RankedDriver> = drivers
        .into_iter()
        .map(|driver| {
            let ranking = find_standing(standings, &driver.driver_id).map(Ranking::from);
            RankedDriver { driver, ranking }
        })
        .collect();

    // Stable: ties and unranked drivers keep their input order.
    ranked.sort_by_key(|r| r.ranking.map_or((true, 0), |rank| (false, rank.position)));
    ranked
}
