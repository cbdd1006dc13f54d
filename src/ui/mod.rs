//! Terminal presentation module
//!
//! This module turns input lines into timer commands and renders the timer
//! state to the terminal.

pub mod commands;
pub mod terminal;

// Re-export main types
pub use commands::{Command, ParseError, HELP, HELP_HINT};
pub use terminal::{dispatch, render, render_task, run_input};
