//! Races, circuits and weekend sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::season::Season;

// ============================================================================
// Circuit
// ============================================================================

/// Where a circuit is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City or region.
    pub locality: String,
    /// Country name.
    pub country: String,
}

/// A circuit hosting a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    /// Stable identifier (`bahrain`).
    pub circuit_id: String,
    /// Display name.
    pub circuit_name: String,
    /// Locality and country.
    #[serde(rename = "Location")]
    pub location: Location,
}

// ============================================================================
// Sessions
// ============================================================================

/// Date and start time of one session of a race weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Day of the session.
    pub date: NaiveDate,
    /// Start time as sent by the API (`13:30:00Z`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// The kinds of session a race weekend can contain, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// FP1.
    FirstPractice,
    /// FP2.
    SecondPractice,
    /// FP3.
    ThirdPractice,
    /// Sprint qualifying (called sprint shootout in 2023).
    SprintQualifying,
    /// Sprint race.
    Sprint,
    /// Grand prix qualifying.
    Qualifying,
    /// The grand prix itself.
    Race,
}

impl SessionKind {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstPractice => "First Practice",
            Self::SecondPractice => "Second Practice",
            Self::ThirdPractice => "Third Practice",
            Self::SprintQualifying => "Sprint Qualifying",
            Self::Sprint => "Sprint",
            Self::Qualifying => "Qualifying",
            Self::Race => "Race",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Race
// ============================================================================

/// A race on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    /// Season the race belongs to.
    pub season: Season,
    /// 1-based position on the calendar.
    #[serde(deserialize_with = "lenient::number_u32")]
    pub round: u32,
    /// Event name (`Bahrain Grand Prix`).
    pub race_name: String,
    /// Reference article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Host circuit.
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    /// Race day.
    pub date: NaiveDate,
    /// Race start time, absent for older seasons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// FP1.
    #[serde(rename = "FirstPractice", default, skip_serializing_if = "Option::is_none")]
    pub first_practice: Option<Session>,
    /// FP2.
    #[serde(rename = "SecondPractice", default, skip_serializing_if = "Option::is_none")]
    pub second_practice: Option<Session>,
    /// FP3.
    #[serde(rename = "ThirdPractice", default, skip_serializing_if = "Option::is_none")]
    pub third_practice: Option<Session>,
    /// Sprint qualifying.
    #[serde(
        rename = "SprintQualifying",
        alias = "SprintShootout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sprint_qualifying: Option<Session>,
    /// Sprint.
    #[serde(rename = "Sprint", default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Session>,
    /// Qualifying.
    #[serde(rename = "Qualifying", default, skip_serializing_if = "Option::is_none")]
    pub qualifying: Option<Session>,
}

impl Race {
    /// The race itself as a session.
    pub fn race_session(&self) -> Session {
        Session {
            date: self.date,
            time: self.time.clone(),
        }
    }

    /// Every scheduled session of the weekend in schedule order, ending with
    /// the race. Sprint sessions come before qualifying.
    pub fn sessions(&self) -> Vec<(SessionKind, Session)> {
        let optional = [
            (SessionKind::FirstPractice, &self.first_practice),
            (SessionKind::SecondPractice, &self.second_practice),
            (SessionKind::ThirdPractice, &self.third_practice),
            (SessionKind::SprintQualifying, &self.sprint_qualifying),
            (SessionKind::Sprint, &self.sprint),
            (SessionKind::Qualifying, &self.qualifying),
        ];

        let mut sessions: Vec<(SessionKind, Session)> = optional
            .into_iter()
            .filter_map(|(kind, session)| session.clone().map(|s| (kind, s)))
            .collect();
        sessions.push((SessionKind::Race, self.race_session()));
        sessions
    }

    /// Returns true if the weekend has a sprint race.
    pub fn is_sprint_weekend(&self) -> bool {
        self.sprint.is_some()
    }
}

// ============================================================================
// Race Calendar
// ============================================================================

/// The races of one season.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RaceCalendar {
    races: Vec<Race>,
}

impl RaceCalendar {
    /// Builds a calendar, ordering races by round.
    pub fn new(mut races: Vec<Race>) -> Self {
        races.sort_by_key(|r| r.round);
        Self { races }
    }

    /// The race whose round equals `round`.
    pub fn round(&self, round: u32) -> Option<&Race> {
        self.races
            .binary_search_by_key(&round, |r| r.round)
            .ok()
            .map(|i| &self.races[i])
    }

    /// Races in calendar order.
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// Consumes the calendar.
    pub fn into_races(self) -> Vec<Race> {
        self.races
    }

    /// Number of races.
    pub fn len(&self) -> usize {
        self.races.len()
    }

    /// Returns true if no races are announced.
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}
