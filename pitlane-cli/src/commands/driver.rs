//! Driver command - details of one driver.

use anyhow::Result;
use clap::Args;
use pitlane_core::parse_driver_id;
use tracing::info;

use super::{CommandError, found, show};
use crate::Cli;

/// Arguments for the driver command.
#[derive(Args)]
pub struct DriverArgs {
    /// Driver identifier, e.g. `max_verstappen`.
    pub driver_id: String,
}

/// Runs the driver command.
pub async fn run(args: &DriverArgs, cli: &Cli) -> Result<()> {
    let driver_id = parse_driver_id(&args.driver_id).map_err(CommandError::from)?;
    show_driver(&driver_id, cli).await
}

/// Shows the profile of `driver_id`.
pub async fn show_driver(driver_id: &str, cli: &Cli) -> Result<()> {
    info!(driver_id, "Loading driver");

    let api = cli.api()?;
    let query = async {
        let profile = api.driver_profile(driver_id).await?;
        found(profile, || format!("Driver '{driver_id}'"))
    };

    show(
        cli,
        query,
        |text, profile| text.format_driver_profile(profile),
        |json, profile| json.format_driver_profile(profile),
    )
    .await
}
