//! Pomodoro state machine
//!
//! Idle --start--> Working --timeout--> ShortBreak | LongBreak --start--> Working ...
//! and reset returns to Idle from anywhere. Every fourth completed work
//! interval is followed by a long break.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Phase, TimerConfig, TimerState};
use crate::error::ValidationError;

/// Work cycles per long break
pub const CYCLES_PER_LONG_BREAK: u64 = 4;

/// Emitted when a phase runs out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCompleted {
    pub previous: Phase,
    pub next: Phase,
    pub completed_work_cycles: u64,
    pub at: DateTime<Utc>,
}

impl PhaseCompleted {
    /// Notification text for the user
    pub fn message(&self) -> &'static str {
        match self.next {
            Phase::ShortBreak => "Short break time!",
            Phase::LongBreak => "Long break time!",
            Phase::Working | Phase::Idle => "Back to work!",
        }
    }
}

/// Owns the countdown and phase transitions. Pure state, no I/O or timers;
/// a driver calls [`TimerEngine::tick`] once per elapsed second.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Start counting down. Leaves Idle for Working; no-op when already running.
    /// Returns whether anything changed.
    pub fn start(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Working;
        }
        self.state.running = true;
        info!(
            "Timer started: phase={}, remaining={}s",
            self.state.phase.as_str(),
            self.state.remaining_seconds
        );
        true
    }

    /// Stop counting down, keeping phase and remaining time
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        info!(
            "Timer paused: phase={}, remaining={}s",
            self.state.phase.as_str(),
            self.state.remaining_seconds
        );
        true
    }

    /// One elapsed second. Ignored while not running.
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        if !self.state.running {
            return None;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        debug!("Tick: remaining={}s", self.state.remaining_seconds);

        if self.state.remaining_seconds == 0 {
            Some(self.complete_phase())
        } else {
            None
        }
    }

    /// Arm the next phase and stop. The user has to start it explicitly.
    pub fn complete_phase(&mut self) -> PhaseCompleted {
        let previous = self.state.phase;
        let next = match previous {
            Phase::Working => {
                self.state.completed_work_cycles += 1;
                if self.state.completed_work_cycles % CYCLES_PER_LONG_BREAK == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak | Phase::Idle => Phase::Working,
        };

        self.state.phase = next;
        self.state.remaining_seconds = next.duration(&self.config);
        self.state.running = false;

        info!(
            "Phase completed: {} -> {}, completed work cycles={}",
            previous.as_str(),
            next.as_str(),
            self.state.completed_work_cycles
        );

        PhaseCompleted {
            previous,
            next,
            completed_work_cycles: self.state.completed_work_cycles,
            at: Utc::now(),
        }
    }

    /// Back to Idle with the work duration armed and the cycle count cleared
    pub fn reset(&mut self) {
        self.state = TimerState::new(&self.config);
        info!("Timer reset");
    }

    /// Replace the durations. While stopped the current phase is re-armed with
    /// its new duration; a running countdown is left alone.
    pub fn apply_settings(&mut self, config: TimerConfig) -> Result<(), ValidationError> {
        config.validate()?;
        self.config = config;
        if !self.state.running {
            self.state.remaining_seconds = self.state.phase.duration(&self.config);
        }
        info!(
            "Settings applied: work={}s, short break={}s, long break={}s",
            config.work_seconds(),
            config.short_break_seconds(),
            config.long_break_seconds()
        );
        Ok(())
    }
}
