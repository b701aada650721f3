//! Drivers and constructors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;

// ============================================================================
// Driver
// ============================================================================

/// A driver entered in a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Stable identifier, unique within a season (e.g. `max_verstappen`).
    pub driver_id: String,
    /// First name.
    pub given_name: String,
    /// Last name.
    pub family_name: String,
    /// Nationality as an adjective (`Dutch`).
    pub nationality: String,
    /// Permanent race number, absent for drivers before 2014.
    #[serde(
        default,
        deserialize_with = "lenient::number_opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub permanent_number: Option<u32>,
    /// Three-letter timing code (`VER`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Reference article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Driver {
    /// Creates a driver with only the required fields set.
    pub fn new(
        driver_id: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        nationality: impl Into<String>,
    ) -> Self {
        Self {
            driver_id: driver_id.into(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            nationality: nationality.into(),
            permanent_number: None,
            code: None,
            date_of_birth: None,
            url: None,
        }
    }

    /// `Given Family`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

// ============================================================================
// Constructor
// ============================================================================

/// A constructor (team) entered in a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorTeam {
    /// Stable identifier (`red_bull`).
    pub constructor_id: String,
    /// Display name (`Red Bull`).
    pub name: String,
    /// Nationality as an adjective.
    pub nationality: String,
    /// Reference article.
    #[serde(default)]
    pub url: String,
}
