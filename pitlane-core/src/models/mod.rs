//! Domain models for Pitlane.
//!
//! ## Submodules
//!
//! - `season` - Season token and identifier validation
//! - `driver` - Drivers and constructors
//! - `standings` - Standing entries and the driver/standings join
//! - `race` - Races, circuits, sessions and the season calendar
//! - `envelope` - `MRData` response envelopes

mod driver;
mod envelope;
mod lenient;
mod race;
mod season;
mod standings;

pub use driver::{ConstructorTeam, Driver};
pub use envelope::{
    ConstructorData, ConstructorResponse, ConstructorTable, DriverData, DriverResponse,
    DriverTable, Envelope, RaceData, RaceResponse, RaceTable, StandingsData, StandingsList,
    StandingsResponse, StandingsTable,
};
pub use race::{Circuit, Location, Race, RaceCalendar, Session, SessionKind};
pub use season::{FIRST_SEASON, Season, parse_driver_id, parse_round};
pub use standings::{find_standing, rank_drivers, RankedDriver, Ranking, StandingEntry};
