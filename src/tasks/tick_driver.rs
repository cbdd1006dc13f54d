//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::AppState;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it is running.
///
/// The running flag is the only cancellation signal: a pause or reset stops
/// the current interval at once, and nothing is scheduled until the next start.
pub async fn tick_driver_task(state: Arc<AppState>) {
    info!("Starting tick driver task");

    let mut run_rx = state.subscribe_running();

    loop {
        // Wait for the timer to be started
        if !*run_rx.borrow_and_update() {
            if run_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Countdown running");
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if state.tick().is_some() {
                        debug!("Phase completed, waiting for next start");
                        break;
                    }
                }

                changed = run_rx.changed() => {
                    if changed.is_err() {
                        info!("Tick driver stopping");
                        return;
                    }
                    if !*run_rx.borrow_and_update() {
                        debug!("Countdown stopped");
                        break;
                    }
                }
            }
        }
    }

    info!("Tick driver stopping");
}
