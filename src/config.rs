//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

const SETTINGS_FILE: &str = "settings.json";
const FALLBACK_SETTINGS_PATH: &str = "pomodoro-settings.json";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A terminal pomodoro timer with work, short break and long break cycles")]
#[command(version)]
pub struct Config {
    /// Settings file holding the three durations in minutes
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Disable the audible cue when a phase completes
    #[arg(long)]
    pub no_sound: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Settings file location, defaulting to the user config directory
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_SETTINGS_PATH))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn sound(&self) -> bool {
        !self.no_sound
    }
}
