//! Blink effect background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::state::{blink::BLINK_INTERVAL_MS, AppState};

/// Toggle the background every 500ms until the sequence ends.
/// Cancelled by aborting the task.
pub async fn blink_task(state: Arc<AppState>) {
    debug!("Starting blink effect");

    let period = Duration::from_millis(BLINK_INTERVAL_MS);
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;
        if !state.advance_blink() {
            break;
        }
    }

    debug!("Blink effect finished");
}
