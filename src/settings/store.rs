//! Settings file storage
//!
//! The record is a small JSON object holding the three durations in minutes:
//! `{ "pomodoro_time": 25, "short_break_time": 5, "long_break_time": 15 }`

use std::{
    fs,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{error::PersistenceError, state::TimerConfig};

/// On-disk settings record, minute valued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub pomodoro_time: i64,
    pub short_break_time: i64,
    pub long_break_time: i64,
}

impl From<&TimerConfig> for SettingsRecord {
    fn from(config: &TimerConfig) -> Self {
        let (work, short_break, long_break) = config.as_minutes();
        Self {
            pomodoro_time: work as i64,
            short_break_time: short_break as i64,
            long_break_time: long_break as i64,
        }
    }
}

impl SettingsRecord {
    /// Convert to a config, rejecting non-positive durations
    pub fn to_config(&self) -> Option<TimerConfig> {
        let minutes = [self.pomodoro_time, self.short_break_time, self.long_break_time];
        if minutes.iter().any(|m| *m <= 0) {
            return None;
        }
        TimerConfig::from_minutes(
            self.pomodoro_time as u64,
            self.short_break_time as u64,
            self.long_break_time as u64,
        )
        .ok()
    }
}

/// Loads and saves the timer durations
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved durations, falling back to defaults on any failure
    pub fn load(&self) -> TimerConfig {
        match self.try_load() {
            Ok(Some(config)) => {
                info!("Loaded settings from {}", self.path.display());
                config
            }
            Ok(None) => {
                info!("No settings file at {}, using defaults", self.path.display());
                TimerConfig::default()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                TimerConfig::default()
            }
        }
    }

    /// Load the saved durations. `Ok(None)` when no file exists yet.
    pub fn try_load(&self) -> Result<Option<TimerConfig>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record: SettingsRecord =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        record
            .to_config()
            .map(Some)
            .ok_or_else(|| PersistenceError::InvalidRecord {
                path: self.path.clone(),
                reason: format!(
                    "durations must be positive, got {}/{}/{}",
                    record.pomodoro_time, record.short_break_time, record.long_break_time
                ),
            })
    }

    /// Write the durations, creating the parent directory if needed
    pub fn save(&self, config: &TimerConfig) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(&SettingsRecord::from(config))?;
        fs::write(&self.path, content).map_err(io_err)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), TimerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        let config = TimerConfig::from_minutes(50, 10, 30).unwrap();

        store.save(&config).unwrap();
        assert_eq!(store.load(), config);

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["pomodoro_time"], 50);
        assert_eq!(value["short_break_time"], 10);
        assert_eq!(value["long_break_time"], 30);
    }

    #[test]
    fn test_corrupted_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ pomodoro_time: ").unwrap();

        let store = SettingsStore::new(&path);
        assert!(matches!(store.try_load(), Err(PersistenceError::Parse { .. })));
        assert_eq!(store.load(), TimerConfig::default());
    }

    #[test]
    fn test_non_positive_record_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"pomodoro_time": 0, "short_break_time": 5, "long_break_time": -1}"#,
        )
        .unwrap();

        let store = SettingsStore::new(&path);
        assert!(matches!(
            store.try_load(),
            Err(PersistenceError::InvalidRecord { .. })
        ));
        assert_eq!(store.load(), TimerConfig::default());
    }

    #[test]
    fn test_save_to_unwritable_path_errors() {
        let dir = TempDir::new().unwrap();
        // a directory in place of the settings file
        let store = SettingsStore::new(dir.path());
        assert!(matches!(
            store.save(&TimerConfig::default()),
            Err(PersistenceError::Io { .. })
        ));
    }
}
