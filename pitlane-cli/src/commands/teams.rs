//! Teams command - constructors of a season.

use anyhow::Result;
use clap::Args;
use pitlane_core::Season;
use tracing::info;

use super::show;
use crate::Cli;

/// Arguments for the teams command.
#[derive(Args, Default)]
pub struct TeamsArgs {
    /// Season year, or "current".
    #[arg(long, short, default_value = "current")]
    pub season: Season,
}

/// Runs the teams command.
pub async fn run(args: &TeamsArgs, cli: &Cli) -> Result<()> {
    info!(season = %args.season, "Loading teams");

    let api = cli.api()?;
    show(
        cli,
        api.constructors(args.season),
        |text, teams| text.format_teams(teams),
        |json, teams| json.format_teams(teams),
    )
    .await
}
