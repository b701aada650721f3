//! Resource paths of the statistics API.

use std::fmt;

use crate::models::Season;

/// A resource the API can serve, rendered to its path with [`Resource::path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `/{season}/drivers.json`
    Drivers(Season),
    /// `/{season}/driverStandings.json`
    DriverStandings(Season),
    /// `/current/drivers/{driverId}.json`
    Driver(String),
    /// `/{season}/constructors.json`
    Constructors(Season),
    /// `/{season}.json`
    RaceCalendar(Season),
    /// `/current/{round}.json`
    Race(u32),
}

impl Resource {
    /// The API-relative path, starting with `/`.
    pub fn path(&self) -> String {
        match self {
            Self::Drivers(season) => format!("/{season}/drivers.json"),
            Self::DriverStandings(season) => format!("/{season}/driverStandings.json"),
            Self::Driver(driver_id) => format!("/current/drivers/{driver_id}.json"),
            Self::Constructors(season) => format!("/{season}/constructors.json"),
            Self::RaceCalendar(season) => format!("/{season}.json"),
            Self::Race(round) => format!("/current/{round}.json"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let y = Season::Year(2024);
        assert_eq!(Resource::Drivers(y).path(), "/2024/drivers.json");
        assert_eq!(Resource::DriverStandings(y).path(), "/2024/driverStandings.json");
        assert_eq!(
            Resource::Driver("max_verstappen".into()).path(),
            "/current/drivers/max_verstappen.json"
        );
        assert_eq!(Resource::Constructors(y).path(), "/2024/constructors.json");
        assert_eq!(Resource::RaceCalendar(Season::Current).path(), "/current.json");
        assert_eq!(Resource::Race(5).path(), "/current/5.json");
    }
}
