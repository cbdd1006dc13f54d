//! Timer phase and countdown state

use super::TimerConfig;

/// Phase of the pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Armed for the first work interval, no cycle completed yet
    Idle,
    Working,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Full duration of this phase under the given config. Idle counts as work.
    pub fn duration(&self, config: &TimerConfig) -> u64 {
        match self {
            Phase::Idle | Phase::Working => config.work_seconds(),
            Phase::ShortBreak => config.short_break_seconds(),
            Phase::LongBreak => config.long_break_seconds(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Working => "working",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }
}

/// Countdown state. Lives for the process only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub completed_work_cycles: u64,
    pub running: bool,
}

impl TimerState {
    /// Create an idle state armed with the work duration
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: config.work_seconds(),
            completed_work_cycles: 0,
            running: false,
        }
    }

    /// Remaining time as MM:SS
    pub fn display_time(&self) -> String {
        format_time(self.remaining_seconds)
    }
}

/// Format seconds as zero-padded MM:SS
pub fn format_time(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
