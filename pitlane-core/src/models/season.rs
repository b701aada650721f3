//! Season and round identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Token the API uses for the season in progress.
const CURRENT: &str = "current";

/// First world championship season.
pub const FIRST_SEASON: u16 = 1950;

// ============================================================================
// Season
// ============================================================================

/// A championship season: a year from 1950 on or the season in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Season {
    /// The season in progress (`current`).
    #[default]
    Current,
    /// A specific year.
    Year(u16),
}

impl Season {
    /// The path segment the API expects for this season.
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }

    /// Returns true for the `current` token.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str(CURRENT),
            Self::Year(year) => write!(f, "{year:04}"),
        }
    }
}

impl FromStr for Season {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(CURRENT) {
            return Ok(Self::Current);
        }
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidSeason(s.to_string()));
        }
        match s.parse::<u16>() {
            Ok(year) if year >= FIRST_SEASON => Ok(Self::Year(year)),
            _ => Err(CoreError::InvalidSeason(s.to_string())),
        }
    }
}

impl From<u16> for Season {
    fn from(year: u16) -> Self {
        Self::Year(year)
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Round
// ============================================================================

/// Parses a 1-based round number.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRound`] for zero, negatives and non-numbers.
pub fn parse_round(s: &str) -> Result<u32, CoreError> {
    match s.trim().parse::<u32>() {
        Ok(round) if round >= 1 => Ok(round),
        _ => Err(CoreError::InvalidRound(s.to_string())),
    }
}

/// Validates a driver identifier before it is spliced into a path.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDriverId`] when the id is empty or contains
/// anything besides ASCII letters, digits, underscores and hyphens.
pub fn parse_driver_id(s: &str) -> Result<String, CoreError> {
    let id = s.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
        return Err(CoreError::InvalidDriverId(s.to_string()));
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season() {
        assert_eq!("2024".parse::<Season>(), Ok(Season::Year(2024)));
        assert_eq!("current".parse::<Season>(), Ok(Season::Current));
        assert_eq!("Current".parse::<Season>(), Ok(Season::Current));
        assert!("24".parse::<Season>().is_err());
        assert!("20x4".parse::<Season>().is_err());
        assert!("".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_before_first_championship_rejected() {
        assert_eq!(
            "0999".parse::<Season>(),
            Err(CoreError::InvalidSeason("0999".to_string()))
        );
        assert!("1949".parse::<Season>().is_err());
        assert_eq!("1950".parse::<Season>(), Ok(Season::Year(1950)));
    }

    #[test]
    fn test_season_display_is_four_digits() {
        assert_eq!(Season::Year(999).to_string(), "0999");
    }

    #[test]
    fn test_season_display() {
        assert_eq!(Season::Year(1988).to_string(), "1988");
        assert_eq!(Season::Current.as_path_segment(), "current");
    }

    #[test]
    fn test_season_serde_is_a_string() {
        let json = serde_json::to_string(&Season::Year(2024)).unwrap();
        assert_eq!(json, r#""2024""#);
        let back: Season = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Season::Year(2024));
    }

    #[test]
    fn test_parse_round() {
        assert_eq!(parse_round("2"), Ok(2));
        assert!(parse_round("0").is_err());
        assert!(parse_round("-1").is_err());
        assert!(parse_round("two").is_err());
    }

    #[test]
    fn test_parse_driver_id() {
        assert_eq!(parse_driver_id("max_verstappen").unwrap(), "max_verstappen");
        assert!(parse_driver_id("").is_err());
        assert!(parse_driver_id("../etc").is_err());
        assert!(parse_driver_id("a b").is_err());
    }
}
