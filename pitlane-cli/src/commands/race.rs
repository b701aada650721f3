//! Race command - session schedule of one race.

use anyhow::Result;
use clap::Args;
use pitlane_core::{Season, parse_round};
use tracing::info;

use super::{CommandError, found, show};
use crate::Cli;

/// Arguments for the race command.
#[derive(Args)]
pub struct RaceArgs {
    /// Round number within the season.
    pub round: String,

    /// Season year, or "current".
    #[arg(long, short, default_value = "current")]
    pub season: Season,
}

/// Runs the race command.
pub async fn run(args: &RaceArgs, cli: &Cli) -> Result<()> {
    let round = parse_round(&args.round).map_err(CommandError::from)?;
    show_race(args.season, round, cli).await
}

/// Shows the schedule of `round` in `season`.
pub async fn show_race(season: Season, round: u32, cli: &Cli) -> Result<()> {
    info!(season = %season, round, "Loading race");

    let api = cli.api()?;
    let query = async {
        let race = api.calendar_race(season, round).await?;
        found(race, || format!("Round {round} of season {season}"))
    };

    show(
        cli,
        query,
        |text, race| text.format_race(race),
        |json, race| json.format_race(race),
    )
    .await
}
