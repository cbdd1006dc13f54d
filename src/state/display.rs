//! What the presentation layer renders

use super::{BlinkColor, BlinkState, Phase, TimerState};

/// Status label shown under the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Ready,
    Working,
    ShortBreak,
    LongBreak,
}

impl StatusLabel {
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::Ready => "Ready",
            StatusLabel::Working => "Working",
            StatusLabel::ShortBreak => "Short break",
            StatusLabel::LongBreak => "Long break",
        }
    }
}

impl From<Phase> for StatusLabel {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => StatusLabel::Ready,
            Phase::Working => StatusLabel::Working,
            Phase::ShortBreak => StatusLabel::ShortBreak,
            Phase::LongBreak => StatusLabel::LongBreak,
        }
    }
}

/// Snapshot published to the renderer on every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub display_time: String,
    pub status: StatusLabel,
    pub blink_color: Option<BlinkColor>,
    pub running: bool,
    pub completed_work_cycles: u64,
}

impl DisplayUpdate {
    pub fn new(state: &TimerState, blink: &BlinkState) -> Self {
        Self {
            display_time: state.display_time(),
            status: state.phase.into(),
            blink_color: blink.color(),
            running: state.running,
            completed_work_cycles: state.completed_work_cycles,
        }
    }
}
