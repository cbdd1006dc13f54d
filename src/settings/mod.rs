//! Settings module
//!
//! Persisted durations and parsing of user-entered values.

pub mod input;
pub mod store;

// Re-export main types
pub use input::{parse_minutes, parse_settings};
pub use store::{SettingsRecord, SettingsStore};
