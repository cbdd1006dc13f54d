//! Parsing of user-entered minute values

use crate::{
    error::ValidationError,
    state::{
        TimerConfig, LONG_BREAK_MINUTES_RANGE, SHORT_BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE,
    },
};

/// Parse one minute field, enforcing the allowed range
pub fn parse_minutes(
    field: &'static str,
    raw: &str,
    (min, max): (u64, u64),
) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: trimmed.to_string(),
    })?;

    if value <= 0 {
        return Err(ValidationError::NonPositive { field });
    }
    if (value as u64) < min || (value as u64) > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value as u64)
}

/// Build a config from the three raw minute strings
pub fn parse_settings(work: &str, short_break: &str, long_break: &str) -> Result<TimerConfig, ValidationError> {
    let work = parse_minutes("work", work, WORK_MINUTES_RANGE)?;
    let short_break = parse_minutes("short break", short_break, SHORT_BREAK_MINUTES_RANGE)?;
    let long_break = parse_minutes("long break", long_break, LONG_BREAK_MINUTES_RANGE)?;
    TimerConfig::from_minutes(work, short_break, long_break)
}
