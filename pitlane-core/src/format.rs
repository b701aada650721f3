//! Display formatting for dates, session times and points.

use chrono::NaiveDate;

/// Formats a date as `Sat Mar 02 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Trims a session time such as `15:00:00Z` down to `15:00`.
///
/// Anything without at least hours and minutes is returned unchanged.
pub fn format_clock(time: &str) -> String {
    let mut parts = time.split(':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) if !hours.is_empty() => {
            let minutes: String = minutes.chars().take_while(char::is_ascii_digit).collect();
            format!("{hours}:{minutes}")
        }
        _ => time.to_string(),
    }
}

/// Formats points without a trailing `.0` for whole numbers.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points}")
    }
}
