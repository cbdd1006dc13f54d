//! Phase durations

use crate::error::ValidationError;

pub const DEFAULT_WORK_MINUTES: u64 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u64 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u64 = 15;

/// Allowed minute ranges for user-entered durations
pub const WORK_MINUTES_RANGE: (u64, u64) = (1, 60);
pub const SHORT_BREAK_MINUTES_RANGE: (u64, u64) = (1, 30);
pub const LONG_BREAK_MINUTES_RANGE: (u64, u64) = (1, 60);

/// Durations of the three timed phases, held in seconds.
///
/// All three are strictly positive; construction goes through
/// [`TimerConfig::from_seconds`] or [`TimerConfig::from_minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    work_seconds: u64,
    short_break_seconds: u64,
    long_break_seconds: u64,
}

impl TimerConfig {
    /// Create a config from durations in seconds
    pub fn from_seconds(
        work_seconds: u64,
        short_break_seconds: u64,
        long_break_seconds: u64,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            work_seconds,
            short_break_seconds,
            long_break_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a config from durations in whole minutes
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Result<Self, ValidationError> {
        Self::from_seconds(
            work.saturating_mul(60),
            short_break.saturating_mul(60),
            long_break.saturating_mul(60),
        )
    }

    /// Check that every duration is positive
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("work", self.work_seconds),
            ("short break", self.short_break_seconds),
            ("long break", self.long_break_seconds),
        ];
        for (field, seconds) in fields {
            if seconds == 0 {
                return Err(ValidationError::NonPositive { field });
            }
        }
        Ok(())
    }

    pub fn work_seconds(&self) -> u64 {
        self.work_seconds
    }

    pub fn short_break_seconds(&self) -> u64 {
        self.short_break_seconds
    }

    pub fn long_break_seconds(&self) -> u64 {
        self.long_break_seconds
    }

    /// Durations as whole minutes (work, short break, long break), rounded up
    pub fn as_minutes(&self) -> (u64, u64, u64) {
        (
            self.work_seconds.div_ceil(60),
            self.short_break_seconds.div_ceil(60),
            self.long_break_seconds.div_ceil(60),
        )
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_MINUTES * 60,
            short_break_seconds: DEFAULT_SHORT_BREAK_MINUTES * 60,
            long_break_seconds: DEFAULT_LONG_BREAK_MINUTES * 60,
        }
    }
}
