//! External side effects module
//!
//! This module contains the audible alert played when a phase completes.

pub mod alert;

// Re-export main types
pub use alert::{alert_for, AlertSink, SilentAlert, TerminalBell};
