//! Audible cue on phase completion

use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::debug;

use crate::state::PhaseCompleted;

/// Something that makes noise when a phase runs out
pub trait AlertSink: Send + Sync {
    fn alert(&self, event: &PhaseCompleted) -> io::Result<()>;
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn alert(&self, event: &PhaseCompleted) -> io::Result<()> {
        debug!("Ringing bell for {} -> {}", event.previous.as_str(), event.next.as_str());
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// No sound at all
#[derive(Debug, Default)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn alert(&self, _event: &PhaseCompleted) -> io::Result<()> {
        Ok(())
    }
}

/// Pick the alert for the given sound preference
pub fn alert_for(sound: bool) -> Arc<dyn AlertSink> {
    if sound {
        Arc::new(TerminalBell)
    } else {
        Arc::new(SilentAlert)
    }
}
