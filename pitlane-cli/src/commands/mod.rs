//! CLI command implementations.
//!
//! Every view runs through [`show`]: await one query, then render the value
//! or the failure in the selected output format.

pub mod driver;
pub mod drivers;
pub mod open;
pub mod race;
pub mod races;
pub mod teams;

use std::future::Future;

use anyhow::Result;
use pitlane_core::CoreError;
use pitlane_fetch::FetchFailure;
use thiserror::Error;
use tracing::{debug, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Why a command could not show its view.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Every attempt to load the data failed.
    #[error("Failed to load data: {}", .0.last)]
    Fetch(#[from] FetchFailure),

    /// A season, round or driver id did not validate.
    #[error(transparent)]
    Input(#[from] CoreError),

    /// The API answered but has no such item.
    #[error("{0} not found")]
    NotFound(String),
}

/// Fetch-and-render pipeline shared by every view.
///
/// Awaits `query`, then prints `render_text` or `render_json` output for the
/// value. A fetch failure is reported before it is returned, in plain text
/// on stderr under `--quiet`; other errors are returned untouched.
pub async fn show<T, E, Q, RT, RJ>(
    cli: &Cli,
    query: Q,
    render_text: RT,
    render_json: RJ,
) -> Result<()>
where
    Q: Future<Output = Result<T, E>>,
    E: Into<CommandError>,
    RT: FnOnce(&TextFormatter, &T) -> String,
    RJ: FnOnce(&JsonFormatter, &T) -> Result<String>,
{
    let result: Result<T, CommandError> = query.await.map_err(Into::into);
    let value = match result {
        Ok(value) => value,
        Err(CommandError::Fetch(failure)) => {
            warn!(
                path = %failure.path,
                attempts = failure.attempts,
                error = %failure.last,
                "Query failed"
            );
            match failure_report(cli, &failure)? {
                Report::Stdout(line) => println!("{line}"),
                Report::Stderr(line) => eprintln!("{line}"),
            }
            return Err(CommandError::Fetch(failure).into());
        }
        Err(other) => return Err(other.into()),
    };

    debug!("Query succeeded, rendering");
    let output = match cli.format {
        OutputFormat::Text => render_text(&TextFormatter::new(!cli.no_color), &value),
        OutputFormat::Json => render_json(&JsonFormatter::new(cli.pretty), &value)?,
    };
    println!("{output}");
    Ok(())
}

/// A rendered failure and the stream it goes to.
#[derive(Debug, PartialEq, Eq)]
enum Report {
    Stdout(String),
    Stderr(String),
}

/// Renders a fetch failure. Quiet mode still gets one plain line on stderr.
fn failure_report(cli: &Cli, failure: &FetchFailure) -> Result<Report> {
    if cli.quiet {
        return Ok(Report::Stderr(TextFormatter::new(false).format_failure(failure)));
    }
    let report = match cli.format {
        OutputFormat::Text => {
            Report::Stderr(TextFormatter::new(!cli.no_color).format_failure(failure))
        }
        OutputFormat::Json => {
            Report::Stdout(JsonFormatter::new(cli.pretty).format_failure(failure)?)
        }
    };
    Ok(report)
}

/// Turns a missing lookup result into [`CommandError::NotFound`].
pub fn found<T>(value: Option<T>, what: impl FnOnce() -> String) -> Result<T, CommandError> {
    value.ok_or_else(|| CommandError::NotFound(what()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pitlane_fetch::{AttemptError, StatusError};

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pitlane").chain(args.iter().copied())).unwrap()
    }

    fn failure() -> FetchFailure {
        FetchFailure {
            path: "/current/drivers.json".to_string(),
            attempts: 3,
            last: AttemptError::Status(StatusError::new(503)),
        }
    }

    #[tokio::test]
    async fn test_show_returns_fetch_failure() {
        let cli = cli(&["--no-color"]);

        let err = show(
            &cli,
            async { Err::<u32, _>(failure()) },
            |_, n| n.to_string(),
            |json, n| json.format(n),
        )
        .await
        .unwrap_err();

        let command_err = err.downcast_ref::<CommandError>().unwrap();
        assert!(matches!(command_err, CommandError::Fetch(f) if f.attempts == 3));
        assert_eq!(err.to_string(), "Failed to load data: HTTP error! Status: 503");
    }

    #[tokio::test]
    async fn test_show_passes_not_found_through() {
        let cli = cli(&[]);

        let err = show(
            &cli,
            async { found(None::<u32>, || "Race 40".to_string()) },
            |_, n| n.to_string(),
            |json, n| json.format(n),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::NotFound(what)) if what == "Race 40"
        ));
        assert_eq!(err.to_string(), "Race 40 not found");
    }

    #[tokio::test]
    async fn test_show_renders_value() {
        let cli = cli(&["--format", "json"]);

        let result = show(
            &cli,
            async { Ok::<_, CommandError>(7_u32) },
            |_, n| n.to_string(),
            |json, n| json.format(n),
        )
        .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_failure_report_streams() {
        let text = failure_report(&cli(&["--no-color"]), &failure()).unwrap();
        assert_eq!(
            text,
            Report::Stderr("Failed to load data: HTTP error! Status: 503".to_string())
        );

        let json = failure_report(&cli(&["--format", "json"]), &failure()).unwrap();
        assert!(matches!(json, Report::Stdout(line) if line.contains(r#""kind":"status""#)));
    }

    #[test]
    fn test_quiet_failure_is_still_reported() {
        let report = failure_report(&cli(&["--quiet", "--format", "json"]), &failure()).unwrap();
        assert_eq!(
            report,
            Report::Stderr("Failed to load data: HTTP error! Status: 503".to_string())
        );
    }
}
