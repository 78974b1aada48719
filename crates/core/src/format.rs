//! Time and date formatting for display and sharing.

use crate::error::ParseError;
use crate::Date;

/// Format seconds as `MM:SS.cc`.
pub fn format_time(seconds: f64) -> String {
    let hundredths = (seconds.max(0.0) * 100.0).round() as u64;
    let minutes = hundredths / 6000;
    let secs = (hundredths % 6000) / 100;
    let centis = hundredths % 100;
    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

/// Format a date as `Mar 01, 2024`.
pub fn format_date(date: Date) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Format a date as `03/01`.
pub fn format_date_short(date: Date) -> String {
    date.format("%m/%d").to_string()
}

/// Whether `seconds` is usable as a swim or target time: finite and positive.
pub fn is_valid_time(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}

/// Parse a time given as `SS.cc` or `MM:SS.cc` into seconds.
pub fn parse_time(input: &str) -> Result<f64, ParseError> {
    let err = || ParseError::Time(input.to_string());
    let trimmed = input.trim();

    let seconds = match trimmed.split_once(':') {
        Some((minutes, rest)) => {
            let minutes: u32 = minutes.parse().map_err(|_| err())?;
            let secs: f64 = rest.parse().map_err(|_| err())?;
            if !(0.0..60.0).contains(&secs) {
                return Err(err());
            }
            minutes as f64 * 60.0 + secs
        }
        None => trimmed.parse().map_err(|_| err())?,
    };

    if is_valid_time(seconds) {
        Ok(seconds)
    } else {
        Err(err())
    }
}
