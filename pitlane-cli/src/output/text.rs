//! Text output formatting with cards, tables and colors.

use pitlane_core::{
    ConstructorTeam, Race, RaceCalendar, RankedDriver, format_clock, format_date, format_points,
};
use pitlane_fetch::FetchFailure;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Shown for a driver without a standing.
const NOT_AVAILABLE: &str = "N/A";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    rule_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            rule_width: 40,
        }
    }

    // ========================================================================
    // Drivers
    // ========================================================================

    /// Formats the ranked driver list as numbered cards.
    pub fn format_ranked_drivers(&self, drivers: &[RankedDriver]) -> String {
        if drivers.is_empty() {
            return self.dim("No drivers announced");
        }

        let cards: Vec<String> = drivers
            .iter()
            .enumerate()
            .map(|(index, ranked)| {
                let points = ranked
                    .ranking
                    .map_or_else(|| "0".to_string(), |r| format_points(r.points));
                format!(
                    "{}\n   {} Points  {}",
                    self.yellow(&format!("{}. {}", index + 1, ranked.driver.full_name())),
                    points,
                    self.dim(&ranked.driver.driver_id)
                )
            })
            .collect();

        cards.join("\n")
    }

    /// Formats one driver's profile.
    pub fn format_driver_profile(&self, profile: &RankedDriver) -> String {
        let driver = &profile.driver;
        let mut lines = vec![self.bold(&driver.full_name()), self.rule()];

        lines.push(format!("Nationality: {}", driver.nationality));
        lines.push(format!(
            "Race number: {}",
            driver
                .permanent_number
                .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string())
        ));
        lines.push(format!(
            "Points:      {}",
            profile
                .ranking
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| format_points(r.points))
        ));
        if let Some(ranking) = profile.ranking {
            lines.push(format!("Position:    {}", ranking.position));
        }
        lines.push(format!(
            "Born:        {}",
            driver
                .date_of_birth
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_date)
        ));
        if let Some(url) = &driver.url {
            lines.push(format!("More:        {}", self.cyan(url)));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Teams
    // ========================================================================

    /// Formats constructors as cards with their reference link.
    pub fn format_teams(&self, teams: &[ConstructorTeam]) -> String {
        if teams.is_empty() {
            return self.dim("No teams announced");
        }

        teams
            .iter()
            .map(|team| {
                let mut card = format!("{}\n   {}", self.yellow(&team.name), team.nationality);
                if !team.url.is_empty() {
                    card.push_str(&format!("\n   {}", self.cyan(&team.url)));
                }
                card
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Races
    // ========================================================================

    /// Formats the calendar as one card per race.
    pub fn format_calendar(&self, calendar: &RaceCalendar) -> String {
        if calendar.is_empty() {
            return self.dim("No races announced");
        }

        calendar
            .races()
            .iter()
            .map(|race| {
                format!(
                    "{}\n   {}  {}",
                    self.yellow(&format!("{:>2}. {}", race.round, race.race_name)),
                    format_date(race.date),
                    self.dim(&format!("round {}", race.round))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats one race with its session table.
    pub fn format_race(&self, race: &Race) -> String {
        let mut lines = vec![self.bold(&race.race_name), self.rule()];
        lines.push(format!("Date:     {}", format_date(race.date)));
        lines.push(format!(
            "Location: {}, {}",
            race.circuit.location.locality, race.circuit.location.country
        ));
        lines.push(format!("Circuit:  {}", race.circuit.circuit_name));
        lines.push(String::new());

        lines.push(self.bold(&format!("{:<18} {:<16} {}", "Event", "Date", "Time")));
        for (kind, session) in race.sessions() {
            let time = session
                .time
                .as_deref()
                .map_or_else(|| "TBC".to_string(), format_clock);
            lines.push(format!(
                "{:<18} {:<16} {}",
                kind.label(),
                format_date(session.date),
                time
            ));
        }

        lines.join("\n")
    }

    // ========================================================================
    // States
    // ========================================================================

    /// Formats a failed load.
    pub fn format_failure(&self, failure: &FetchFailure) -> String {
        self.red(&format!("Failed to load data: {}", failure.last))
    }

    /// Formats the neutral state for an unrecognized page.
    pub fn format_nothing(&self) -> String {
        self.dim("Nothing to load")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn rule(&self) -> String {
        "─".repeat(self.rule_width)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_has_no_escapes() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_nothing(), "Nothing to load");
        assert!(!formatter.rule().contains('\x1b'));
    }

    #[test]
    fn test_colors_wrap_text() {
        let formatter = TextFormatter::new(true);
        let out = formatter.red("boom");
        assert!(out.starts_with(RED));
        assert!(out.ends_with(RESET));
    }

    #[test]
    fn test_empty_lists() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_ranked_drivers(&[]), "No drivers announced");
        assert_eq!(formatter.format_teams(&[]), "No teams announced");
        assert_eq!(
            formatter.format_calendar(&RaceCalendar::default()),
            "No races announced"
        );
    }
}
