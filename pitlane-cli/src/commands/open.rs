//! Open command - route a page reference to its view.
//!
//! Accepts the page names of the web front end (`drivers.html`,
//! `driver-show.html?driverId=..`, `teams.html`, `races.html`,
//! `races-show.html?raceId=..`). Anything else shows a neutral
//! "Nothing to load" state.

use anyhow::Result;
use clap::Args;
use pitlane_core::{CoreError, Season, parse_driver_id, parse_round};
use tracing::{debug, info};
use url::Url;

use super::{CommandError, driver, drivers, race, races, teams};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Page reference, e.g. `races-show.html?raceId=5`.
    pub page: String,

    /// Season year, or "current", for season-wide pages.
    #[arg(long, short, default_value = "current")]
    pub season: Season,
}

/// A view selected by a page reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Ranked driver list.
    Drivers,
    /// One driver.
    Driver(String),
    /// Constructor list.
    Teams,
    /// Race calendar.
    Races,
    /// One race by round.
    Race(u32),
    /// Unrecognized reference.
    Nothing,
}

/// Resolves a page reference.
///
/// Only the file name and its query string matter; directories and unknown
/// parameters are ignored. A detail page without its identifier resolves to
/// [`Page::Nothing`].
///
/// # Errors
///
/// Returns [`CoreError`] when an identifier is present but invalid.
pub fn route(reference: &str) -> Result<Page, CoreError> {
    let Some(url) = Url::parse("file:///")
        .ok()
        .and_then(|base| base.join(reference.trim()).ok())
    else {
        return Ok(Page::Nothing);
    };

    let file = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    let page = match file {
        "drivers.html" => Page::Drivers,
        "driver-show.html" => match param("driverId") {
            Some(id) => Page::Driver(parse_driver_id(&id)?),
            None => Page::Nothing,
        },
        "teams.html" => Page::Teams,
        "races.html" => Page::Races,
        "races-show.html" => match param("raceId") {
            Some(round) => Page::Race(parse_round(&round)?),
            None => Page::Nothing,
        },
        _ => Page::Nothing,
    };
    Ok(page)
}

/// Runs the open command.
pub async fn run(args: &OpenArgs, cli: &Cli) -> Result<()> {
    let page = route(&args.page).map_err(CommandError::from)?;
    info!(reference = %args.page, page = ?page, "Opening page");

    match page {
        Page::Drivers => {
            drivers::run(&drivers::DriversArgs { season: args.season }, cli).await
        }
        Page::Driver(driver_id) => driver::show_driver(&driver_id, cli).await,
        Page::Teams => teams::run(&teams::TeamsArgs { season: args.season }, cli).await,
        Page::Races => races::run(&races::RacesArgs { season: args.season }, cli).await,
        Page::Race(round) => race::show_race(args.season, round, cli).await,
        Page::Nothing => {
            debug!("No view for page reference");
            let output = match cli.format {
                OutputFormat::Text => TextFormatter::new(!cli.no_color).format_nothing(),
                OutputFormat::Json => JsonFormatter::new(cli.pretty).format_nothing()?,
            };
            println!("{output}");
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
