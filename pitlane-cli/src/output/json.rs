//! JSON output formatting.

use anyhow::Result;
use chrono::NaiveDate;
use pitlane_core::{ConstructorTeam, Race, RaceCalendar, RankedDriver, Season, format_clock};
use pitlane_fetch::FetchFailure;
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// One card of the ranked driver list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCardOutput {
    pub rank: usize,
    pub driver_id: String,
    pub name: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    pub points: f64,
}

/// A driver's profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfileOutput {
    pub driver_id: String,
    pub name: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_date_opt")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One constructor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOutput {
    pub constructor_id: String,
    pub name: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// One race on the calendar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceCardOutput {
    pub season: Season,
    pub round: u32,
    pub race_name: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

/// A race with its sessions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDetailOutput {
    #[serde(flatten)]
    pub race: RaceCardOutput,
    pub circuit_name: String,
    pub locality: String,
    pub country: String,
    pub sessions: Vec<SessionOutput>,
}

/// One row of a race's session table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutput {
    pub event: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A failed load.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureOutput {
    pub error: String,
    pub kind: String,
    pub path: String,
    pub attempts: u32,
}

/// The neutral state for an unrecognized page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NothingOutput {
    pub message: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_date<S>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

#[allow(clippy::ref_option)]
fn serialize_date_opt<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serialize_date(date, s),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the ranked driver list.
    pub fn format_ranked_drivers(&self, drivers: &[RankedDriver]) -> Result<String> {
        let cards: Vec<DriverCardOutput> = drivers
            .iter()
            .enumerate()
            .map(|(index, ranked)| DriverCardOutput {
                rank: index + 1,
                driver_id: ranked.driver.driver_id.clone(),
                name: ranked.driver.full_name(),
                nationality: ranked.driver.nationality.clone(),
                position: ranked.ranking.map(|r| r.position),
                points: ranked.ranking.map_or(0.0, |r| r.points),
            })
            .collect();
        self.format(&cards)
    }

    /// Formats one driver's profile.
    pub fn format_driver_profile(&self, profile: &RankedDriver) -> Result<String> {
        let driver = &profile.driver;
        self.format(&DriverProfileOutput {
            driver_id: driver.driver_id.clone(),
            name: driver.full_name(),
            nationality: driver.nationality.clone(),
            permanent_number: driver.permanent_number,
            code: driver.code.clone(),
            date_of_birth: driver.date_of_birth,
            position: profile.ranking.map(|r| r.position),
            points: profile.ranking.map(|r| r.points),
            url: driver.url.clone(),
        })
    }

    /// Formats constructors.
    pub fn format_teams(&self, teams: &[ConstructorTeam]) -> Result<String> {
        let outputs: Vec<TeamOutput> = teams
            .iter()
            .map(|team| TeamOutput {
                constructor_id: team.constructor_id.clone(),
                name: team.name.clone(),
                nationality: team.nationality.clone(),
                url: team.url.clone(),
            })
            .collect();
        self.format(&outputs)
    }

    /// Formats the race calendar.
    pub fn format_calendar(&self, calendar: &RaceCalendar) -> Result<String> {
        let cards: Vec<RaceCardOutput> = calendar.races().iter().map(race_card).collect();
        self.format(&cards)
    }

    /// Formats one race with its sessions.
    pub fn format_race(&self, race: &Race) -> Result<String> {
        let sessions = race
            .sessions()
            .into_iter()
            .map(|(kind, session)| SessionOutput {
                event: kind.label().to_string(),
                date: session.date,
                time: session.time.as_deref().map(format_clock),
            })
            .collect();

        self.format(&RaceDetailOutput {
            race: race_card(race),
            circuit_name: race.circuit.circuit_name.clone(),
            locality: race.circuit.location.locality.clone(),
            country: race.circuit.location.country.clone(),
            sessions,
        })
    }

    /// Formats a failed load.
    pub fn format_failure(&self, failure: &FetchFailure) -> Result<String> {
        self.format(&FailureOutput {
            error: format!("Failed to load data: {}", failure.last),
            kind: failure.last.kind().to_string(),
            path: failure.path.clone(),
            attempts: failure.attempts,
        })
    }

    /// Formats the neutral state for an unrecognized page.
    pub fn format_nothing(&self) -> Result<String> {
        self.format(&NothingOutput {
            message: "Nothing to load".to_string(),
        })
    }
}

fn race_card(race: &Race) -> RaceCardOutput {
    RaceCardOutput {
        season: race.season,
        round: race.round,
        race_name: race.race_name.clone(),
        date: race.date,
    }
}
