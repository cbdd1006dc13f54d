//! State management module
//!
//! This module contains the timer state machine and the shared application
//! state the background tasks and the terminal adapter work against.

pub mod app_state;
pub mod blink;
pub mod display;
pub mod engine;
pub mod timer_config;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use blink::{BlinkColor, BlinkState};
pub use display::{DisplayUpdate, StatusLabel};
pub use engine::{PhaseCompleted, TimerEngine};
pub use timer_config::*;
pub use timer_state::{format_time, Phase, TimerState};
