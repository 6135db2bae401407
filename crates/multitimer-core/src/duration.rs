//! Human duration parsing and formatting.
//!
//! Timer durations are entered either as `MM:SS` or as a bare number of
//! minutes. Internally everything is a [`std::time::Duration`].

use std::time::Duration;

use crate::error::ParseDurationError;

/// Parse a trimmed duration string.
///
/// `"5"` is five minutes, `"1:30"` is ninety seconds. Exactly two fields
/// are allowed around a `:`. Fields may be signed (`"2:-30"` is 90s) but
/// a negative total is rejected, since durations cannot run backwards.
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let input = input.trim();
    let total_secs = if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() != 2 {
            return Err(ParseDurationError::Format);
        }
        let minutes: i64 = parts[0]
            .parse()
            .map_err(|_| ParseDurationError::Number)?;
        let seconds: i64 = parts[1]
            .parse()
            .map_err(|_| ParseDurationError::Number)?;
        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or(ParseDurationError::Overflow)?
    } else {
        let minutes: i64 = input.parse().map_err(|_| ParseDurationError::Number)?;
        minutes.checked_mul(60).ok_or(ParseDurationError::Overflow)?
    };

    u64::try_from(total_secs)
        .map(Duration::from_secs)
        .map_err(|_| ParseDurationError::Negative)
}

/// Format a duration as `MM:SS` for the status display.
pub fn format_mmss(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
