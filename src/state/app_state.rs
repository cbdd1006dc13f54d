//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::{BlinkState, DisplayUpdate, PhaseCompleted, TimerConfig, TimerEngine, TimerState};
use crate::{
    error::ValidationError,
    services::AlertSink,
    settings::{parse_settings, SettingsStore},
    tasks::blink_task,
};

/// Shared state between the tick driver, the blink effect and the terminal
pub struct AppState {
    /// Timer state machine, the single owner of countdown state
    engine: Mutex<TimerEngine>,
    /// Background blink progress
    blink: Mutex<BlinkState>,
    blink_task: Mutex<Option<JoinHandle<()>>>,
    /// Persistence and alert collaborators
    store: SettingsStore,
    alert: Arc<dyn AlertSink>,
    /// Session metadata
    pub start_time: Instant,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Channel for display updates
    display_tx: watch::Sender<DisplayUpdate>,
    /// Keep the receiver alive to prevent channel closure
    _display_rx: watch::Receiver<DisplayUpdate>,
    /// Mirrors the engine's running flag for the tick driver
    run_tx: watch::Sender<bool>,
    _run_rx: watch::Receiver<bool>,
    /// Channel for phase completion notifications
    phase_tx: broadcast::Sender<PhaseCompleted>,
}

/// Recover the guard from a poisoned lock. Engine methods never panic halfway
/// through a mutation, so the inner value is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("Recovering poisoned lock");
        poisoned.into_inner()
    })
}

impl AppState {
    /// Create a new AppState around the given durations
    pub fn new(config: TimerConfig, store: SettingsStore, alert: Arc<dyn AlertSink>) -> Self {
        let engine = TimerEngine::new(config);
        let initial = DisplayUpdate::new(engine.state(), &BlinkState::default());
        let (display_tx, display_rx) = watch::channel(initial);
        let (run_tx, run_rx) = watch::channel(false);
        let (phase_tx, _) = broadcast::channel(16);

        Self {
            engine: Mutex::new(engine),
            blink: Mutex::new(BlinkState::default()),
            blink_task: Mutex::new(None),
            store,
            alert,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            display_tx,
            _display_rx: display_rx,
            run_tx,
            _run_rx: run_rx,
            phase_tx,
        }
    }

    // The run signal, the blink and phase notifications are only changed
    // while the engine guard is held, so they always follow the engine's
    // own order of transitions. Lock order: engine, blink_task, blink.

    /// Start or resume the countdown
    pub fn start(&self) -> TimerState {
        let (changed, state) = {
            let mut engine = lock(&self.engine);
            let changed = engine.start();
            if changed {
                self.set_running(true);
            }
            (changed, engine.state().clone())
        };
        if changed {
            self.record_action("start");
            self.publish();
        }
        state
    }

    /// Pause the countdown
    pub fn pause(&self) -> TimerState {
        let (changed, state) = {
            let mut engine = lock(&self.engine);
            let changed = engine.pause();
            if changed {
                self.set_running(false);
            }
            (changed, engine.state().clone())
        };
        if changed {
            self.record_action("pause");
            self.publish();
        }
        state
    }

    /// Single start/pause button
    pub fn toggle(&self) -> TimerState {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to Idle, cancelling any blink in progress
    pub fn reset(&self) -> TimerState {
        let state = {
            let mut engine = lock(&self.engine);
            engine.reset();
            self.set_running(false);
            self.cancel_blink();
            engine.state().clone()
        };
        self.record_action("reset");
        self.publish();
        state
    }

    /// Validate raw minute strings, apply them and persist them.
    /// On error nothing changes.
    pub fn apply_settings(
        &self,
        work: &str,
        short_break: &str,
        long_break: &str,
    ) -> Result<TimerConfig, ValidationError> {
        let config = parse_settings(work, short_break, long_break)?;
        self.apply_config(config)?;
        Ok(config)
    }

    /// Apply an already-built config and persist it
    pub fn apply_config(&self, config: TimerConfig) -> Result<(), ValidationError> {
        {
            let mut engine = lock(&self.engine);
            engine.apply_settings(config)?;
            self.cancel_blink();
        }
        self.record_action("apply-settings");
        self.publish();
        self.save_settings();
        Ok(())
    }

    /// One elapsed second, called by the tick driver
    pub fn tick(self: &Arc<Self>) -> Option<PhaseCompleted> {
        let completed = {
            let mut engine = lock(&self.engine);
            let completed = engine.tick();
            if let Some(event) = &completed {
                self.set_running(false);
                self.start_blink();
                if let Err(e) = self.phase_tx.send(event.clone()) {
                    debug!("No listener for phase completion: {}", e);
                }
            }
            completed
        };

        self.publish();
        if let Some(event) = &completed {
            if let Err(e) = self.alert.alert(event) {
                warn!("Failed to play completion alert: {}", e);
            }
        }
        completed
    }

    /// Begin a fresh blink sequence, replacing any running one
    fn start_blink(self: &Arc<Self>) {
        let mut task = lock(&self.blink_task);
        if let Some(handle) = task.take() {
            handle.abort();
        }
        *lock(&self.blink) = BlinkState::started();
        *task = Some(tokio::spawn(blink_task(Arc::clone(self))));
    }

    /// Advance the blink by one toggle. Returns false once it is over.
    pub fn advance_blink(&self) -> bool {
        let still_active = lock(&self.blink).advance();
        self.publish();
        still_active
    }

    fn cancel_blink(&self) {
        if let Some(handle) = lock(&self.blink_task).take() {
            handle.abort();
        }
        lock(&self.blink).clear();
    }

    pub fn blink_state(&self) -> BlinkState {
        *lock(&self.blink)
    }

    /// Persist the current durations. Failures are logged and dropped.
    pub fn save_settings(&self) {
        let config = self.config();
        if let Err(e) = self.store.save(&config) {
            warn!("Failed to save settings: {}", e);
        }
    }

    /// Get current timer state
    pub fn timer_state(&self) -> TimerState {
        lock(&self.engine).state().clone()
    }

    pub fn config(&self) -> TimerConfig {
        lock(&self.engine).config()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.engine).is_running()
    }

    /// Current display snapshot
    pub fn display(&self) -> DisplayUpdate {
        let state = self.timer_state();
        let blink = self.blink_state();
        DisplayUpdate::new(&state, &blink)
    }

    pub fn subscribe_display(&self) -> watch::Receiver<DisplayUpdate> {
        self.display_tx.subscribe()
    }

    pub fn subscribe_running(&self) -> watch::Receiver<bool> {
        self.run_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PhaseCompleted> {
        self.phase_tx.subscribe()
    }

    fn publish(&self) {
        if let Err(e) = self.display_tx.send(self.display()) {
            warn!("Failed to send display update: {}", e);
        }
    }

    fn set_running(&self, running: bool) {
        self.run_tx.send_if_modified(|current| {
            let modified = *current != running;
            *current = running;
            modified
        });
    }

    fn record_action(&self, action: &str) {
        info!("Command: {}", action);
        *lock(&self.last_action) = Some((action.to_string(), Utc::now()));
    }

    /// Get last action information
    pub fn last_action(&self) -> Option<(String, DateTime<Utc>)> {
        lock(&self.last_action).clone()
    }

    /// Calculate session uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SilentAlert;
    use crate::state::{Phase, StatusLabel};
    use tempfile::TempDir;

    fn app(dir: &TempDir, config: TimerConfig) -> Arc<AppState> {
        let store = SettingsStore::new(dir.path().join("settings.json"));
        Arc::new(AppState::new(config, store, Arc::new(SilentAlert)))
    }

    #[test]
    fn test_invalid_settings_leave_config_untouched() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::default());

        let err = state.apply_settings("abc", "5", "15").unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { .. }));
        assert_eq!(state.config(), TimerConfig::default());
        assert_eq!(state.timer_state().remaining_seconds, 1500);
        // nothing persisted on failure
        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_apply_settings_persists_and_updates_display() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::default());
        let display = state.subscribe_display();

        state.apply_settings("50", "10", "30").unwrap();
        assert_eq!(display.borrow().display_time, "50:00");
        assert_eq!(display.borrow().status, StatusLabel::Ready);

        let reloaded = SettingsStore::new(dir.path().join("settings.json")).load();
        assert_eq!(reloaded, TimerConfig::from_minutes(50, 10, 30).unwrap());
    }

    #[test]
    fn test_toggle_flips_running_signal() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::default());
        let running = state.subscribe_running();

        state.toggle();
        assert!(*running.borrow());
        assert_eq!(state.timer_state().phase, Phase::Working);

        state.toggle();
        assert!(!*running.borrow());
        assert_eq!(state.timer_state().phase, Phase::Working);
        assert_eq!(state.last_action().unwrap().0, "pause");
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let mutex = Arc::new(Mutex::new(7));
        let poisoner = Arc::clone(&mutex);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(mutex.is_poisoned());
        assert_eq!(*lock(&mutex), 7);
    }

    #[tokio::test]
    async fn test_start_after_completion_rearms_run_signal() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::from_seconds(1, 1, 1).unwrap());
        let running = state.subscribe_running();

        state.start();
        state.tick().unwrap();
        assert!(!*running.borrow());

        state.start();
        assert!(*running.borrow());
        assert!(state.is_running());
        assert_eq!(state.timer_state().phase, Phase::ShortBreak);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run_signal_and_blink_follow_engine_under_contention() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::from_seconds(1, 1, 1).unwrap());

        let ticker = {
            let state = Arc::clone(&state);
            tokio::task::spawn_blocking(move || {
                for _ in 0..5_000 {
                    state.start();
                    state.tick();
                }
            })
        };
        let commander = {
            let state = Arc::clone(&state);
            tokio::task::spawn_blocking(move || {
                for i in 0..5_000 {
                    state.start();
                    if i % 3 == 0 {
                        state.reset();
                    }
                }
            })
        };
        ticker.await.unwrap();
        commander.await.unwrap();

        // the driver's signal matches the engine once everything settles
        assert_eq!(*state.subscribe_running().borrow(), state.is_running());
        // a blink never outlives a reset into Idle
        if state.timer_state().phase == Phase::Idle {
            assert!(!state.blink_state().active);
        }

        state.reset();
        assert!(!*state.subscribe_running().borrow());
        assert!(!state.blink_state().active);
    }

    #[tokio::test]
    async fn test_completion_broadcasts_and_blinks() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir, TimerConfig::from_seconds(1, 1, 1).unwrap());
        let mut events = state.subscribe_events();

        state.start();
        let event = state.tick().unwrap();
        assert_eq!(event.next, Phase::ShortBreak);
        assert_eq!(events.recv().await.unwrap(), event);
        assert!(state.blink_state().active);
        assert!(!*state.subscribe_running().borrow());

        state.reset();
        assert!(!state.blink_state().active);
        assert_eq!(state.display().blink_color, None);
        assert_eq!(state.display().status, StatusLabel::Ready);
    }
}
