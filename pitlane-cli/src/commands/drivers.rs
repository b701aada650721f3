//! Drivers command - drivers ordered by championship position.

use anyhow::Result;
use clap::Args;
use pitlane_core::Season;
use tracing::info;

use super::show;
use crate::Cli;

/// Arguments for the drivers command.
#[derive(Args, Default)]
pub struct DriversArgs {
    /// Season year, or "current".
    #[arg(long, short, default_value = "current")]
    pub season: Season,
}

/// Runs the drivers command.
pub async fn run(args: &DriversArgs, cli: &Cli) -> Result<()> {
    info!(season = %args.season, "Loading drivers");

    let api = cli.api()?;
    show(
        cli,
        api.ranked_drivers(args.season),
        |text, drivers| text.format_ranked_drivers(drivers),
        |json, drivers| json.format_ranked_drivers(drivers),
    )
    .await
}
