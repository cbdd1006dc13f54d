//! Pomodoro Timer - A terminal countdown for work/break cycles
//!
//! This library provides the pomodoro state machine (work intervals, short
//! breaks, a long break after every fourth work interval), persisted duration
//! settings, and the background tasks that drive the countdown.

pub mod config;
pub mod error;
pub mod services;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PersistenceError, ValidationError};
pub use settings::SettingsStore;
pub use state::{AppState, Phase, TimerConfig, TimerEngine, TimerState};
pub use utils::signals::shutdown_signal;
