// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Pitlane CLI - Formula 1 drivers, teams and races from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Drivers of the current season ordered by championship position
//! pitlane drivers
//!
//! # One driver
//! pitlane driver max_verstappen
//!
//! # Teams and calendar of a past season
//! pitlane teams --season 2023
//! pitlane races --season 2023
//!
//! # Session schedule of round 5
//! pitlane race 5
//!
//! # Open a page reference
//! pitlane open "races-show.html?raceId=5"
//!
//! # JSON output
//! pitlane drivers --format json --pretty
//! ```

mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pitlane_fetch::{DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, F1Api, FetchSettings, ResilientFetcher};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{CommandError, driver, drivers, open, race, races, teams};

// ============================================================================
// CLI Definition
// ============================================================================

/// Pitlane CLI - Formula 1 statistics.
#[derive(Parser)]
#[command(name = "pitlane")]
#[command(about = "Formula 1 drivers, teams and races from the Ergast API")]
#[command(long_about = r#"
Pitlane shows Formula 1 data from the Ergast statistics API.

Requests that fail are retried before giving up; the number of attempts
and the delay between them are configurable.

Examples:
  pitlane drivers                      # Drivers by championship position
  pitlane driver leclerc               # One driver
  pitlane teams --season 2023          # Constructors of a season
  pitlane races                        # Race calendar
  pitlane race 5                       # Session schedule of round 5
  pitlane open "teams.html"            # Open a page reference
  pitlane --format json drivers        # JSON output
"#)]
#[command(version)]
#[command(author = "Pitlane Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'drivers' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// API base address.
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Attempts per request before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, global = true)]
    pub attempts: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Delay between attempts in milliseconds (doubles after each failure).
    #[arg(long, default_value = "0", global = true)]
    pub retry_delay_ms: u64,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Fetch settings described by the global flags.
    pub fn fetch_settings(&self) -> FetchSettings {
        let settings = FetchSettings::default()
            .with_base_url(self.base_url.clone())
            .with_max_attempts(self.attempts)
            .with_timeout(Duration::from_secs(self.timeout));

        if self.retry_delay_ms > 0 {
            settings.with_backoff(Duration::from_millis(self.retry_delay_ms))
        } else {
            settings
        }
    }

    /// Builds the API client for this invocation.
    pub fn api(&self) -> Result<F1Api> {
        let fetcher = ResilientFetcher::builder()
            .settings(self.fetch_settings())
            .build()?;
        Ok(F1Api::new(fetcher))
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Drivers ordered by championship position (default).
    #[command(visible_alias = "d")]
    Drivers(drivers::DriversArgs),

    /// Details of one driver.
    Driver(driver::DriverArgs),

    /// Constructors of a season.
    #[command(visible_alias = "t")]
    Teams(teams::TeamsArgs),

    /// Race calendar of a season.
    #[command(visible_alias = "r")]
    Races(races::RacesArgs),

    /// Session schedule of one race.
    Race(race::RaceArgs),

    /// Open a page reference such as `driver-show.html?driverId=alonso`.
    Open(open::OpenArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Every attempt to load the data failed.
    FetchFailed = 2,
    /// Invalid season, round or driver id.
    InvalidInput = 3,
    /// The API has no such driver or race.
    NotFound = 4,
}

impl ExitCode {
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CommandError>() {
            Some(CommandError::Fetch(_)) => Self::FetchFailed,
            Some(CommandError::Input(_)) => Self::InvalidInput,
            Some(CommandError::NotFound(_)) => Self::NotFound,
            None => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("pitlane=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pitlane=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Drivers(args)) => drivers::run(args, &cli).await,
        Some(Commands::Driver(args)) => driver::run(args, &cli).await,
        Some(Commands::Teams(args)) => teams::run(args, &cli).await,
        Some(Commands::Races(args)) => races::run(args, &cli).await,
        Some(Commands::Race(args)) => race::run(args, &cli).await,
        Some(Commands::Open(args)) => open::run(args, &cli).await,
        None => drivers::run(&drivers::DriversArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        let code = ExitCode::for_error(&e);
        // Fetch failures were already reported by the command.
        if !cli.quiet && code != ExitCode::FetchFailed {
            eprintln!("Error: {e}");
        }
        std::process::exit(code as i32);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
