//! Races command - the race calendar of a season.

use anyhow::Result;
use clap::Args;
use pitlane_core::Season;
use tracing::info;

use super::show;
use crate::Cli;

/// Arguments for the races command.
#[derive(Args, Default)]
pub struct RacesArgs {
    /// Season year, or "current".
    #[arg(long, short, default_value = "current")]
    pub season: Season,
}

/// Runs the races command.
pub async fn run(args: &RacesArgs, cli: &Cli) -> Result<()> {
    info!(season = %args.season, "Loading race calendar");

    let api = cli.api()?;
    show(
        cli,
        api.race_calendar(args.season),
        |text, calendar| text.format_calendar(calendar),
        |json, calendar| json.format_calendar(calendar),
    )
    .await
}
