//! Terminal presentation adapter
//!
//! Reads commands line by line, forwards them to the shared state, and prints
//! display updates and phase notifications as they arrive.

use std::sync::Arc;
use chrono::Local;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info, warn};

use super::commands::{Command, ParseError, HELP};
use crate::state::{AppState, DisplayUpdate, PhaseCompleted};

const HIGHLIGHT: &str = "\x1b[41m";
const RESET_STYLE: &str = "\x1b[0m";

/// One display line, highlighted while the blink is on
pub fn render(update: &DisplayUpdate) -> String {
    let line = format!(
        "[{}] {}{}",
        update.status.text(),
        update.display_time,
        if update.running { "" } else { " (paused)" }
    );
    match update.blink_color {
        Some(_) => format!("{}{}{}", HIGHLIGHT, line, RESET_STYLE),
        None => line,
    }
}

/// Notification line for a completed phase
pub fn render_notification(event: &PhaseCompleted) -> String {
    format!(
        "{} {} (completed work cycles: {})",
        event.at.with_timezone(&Local).format("%H:%M"),
        event.message(),
        event.completed_work_cycles
    )
}

/// Print every display update and phase notification until the state goes away
pub async fn render_task<W>(state: Arc<AppState>, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    let mut display_rx = state.subscribe_display();
    let mut events_rx = state.subscribe_events();
    let mut last_line = String::new();

    loop {
        let text = tokio::select! {
            changed = display_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let line = render(&display_rx.borrow_and_update());
                if line == last_line {
                    continue;
                }
                last_line = line.clone();
                line
            }

            event = events_rx.recv() => match event {
                Ok(event) => render_notification(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer skipped {} phase notifications", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        };

        if let Err(e) = write_line(&mut out, &text).await {
            warn!("Failed to write display update: {}", e);
        }
    }

    debug!("Renderer stopped");
}

/// Read commands until `quit` or end of input
pub async fn run_input<R, W>(state: &AppState, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(ParseError::Unknown(name)) => {
                write_line(&mut out, &format!("Unknown command '{}', type 'help'", name)).await?;
                continue;
            }
            Err(ParseError::Usage(usage)) => {
                write_line(&mut out, &format!("Usage: {}", usage)).await?;
                continue;
            }
        };

        if command == Command::Quit {
            info!("Quit requested");
            return Ok(());
        }
        if let Some(reply) = dispatch(state, command) {
            write_line(&mut out, &reply).await?;
        }
    }

    info!("Input closed");
    Ok(())
}

/// Apply one command, returning text for the user if there is any
pub fn dispatch(state: &AppState, command: Command) -> Option<String> {
    match command {
        Command::Start => {
            state.start();
            None
        }
        Command::Pause => {
            state.pause();
            None
        }
        Command::Toggle => {
            state.toggle();
            None
        }
        Command::Reset => {
            state.reset();
            None
        }
        Command::Set {
            work,
            short_break,
            long_break,
        } => match state.apply_settings(&work, &short_break, &long_break) {
            Ok(config) => {
                let (work, short_break, long_break) = config.as_minutes();
                Some(format!(
                    "New settings applied: work {}m, short break {}m, long break {}m",
                    work, short_break, long_break
                ))
            }
            Err(e) => {
                warn!("Rejected settings: {}", e);
                Some(format!("Invalid settings: {}", e))
            }
        },
        Command::Status => Some(status_text(state)),
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    }
}

fn status_text(state: &AppState) -> String {
    let display = state.display();
    let (work, short_break, long_break) = state.config().as_minutes();
    let last_action = state
        .last_action()
        .map(|(action, at)| format!("{} at {}", action, at.with_timezone(&Local).format("%H:%M:%S")))
        .unwrap_or_else(|| "none".to_string());

    format!(
        "{}\ncompleted work cycles: {}\nsettings: work {}m, short break {}m, long break {}m\nlast action: {}\nuptime: {}",
        render(&display),
        display.completed_work_cycles,
        work,
        short_break,
        long_break,
        last_action,
        state.uptime()
    )
}

async fn write_line<W>(out: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::SilentAlert,
        settings::SettingsStore,
        state::{BlinkColor, Phase, StatusLabel, TimerConfig},
    };
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> Arc<AppState> {
        let store = SettingsStore::new(dir.path().join("settings.json"));
        Arc::new(AppState::new(TimerConfig::default(), store, Arc::new(SilentAlert)))
    }

    #[test]
    fn test_render_plain_and_highlighted() {
        let mut update = DisplayUpdate {
            display_time: "04:59".to_string(),
            status: StatusLabel::ShortBreak,
            blink_color: None,
            running: true,
            completed_work_cycles: 1,
        };
        assert_eq!(render(&update), "[Short break] 04:59");

        update.running = false;
        update.blink_color = Some(BlinkColor::Alert);
        assert_eq!(render(&update), "\x1b[41m[Short break] 04:59 (paused)\x1b[0m");
    }

    #[tokio::test]
    async fn test_run_input_dispatches_until_quit() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir);
        let input: &[u8] = b"start\n\nbogus\nset 50 abc 30\nquit\nreset\n";
        let mut out = Vec::new();

        run_input(&state, input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unknown command 'bogus'"));
        assert!(printed.contains("Invalid settings: short break: 'abc'"));
        // reset after quit is never read
        assert_eq!(state.timer_state().phase, Phase::Working);
        assert!(state.is_running());
        assert_eq!(state.config(), TimerConfig::default());
    }

    #[test]
    fn test_dispatch_set_and_status() {
        let dir = TempDir::new().unwrap();
        let state = app(&dir);

        let reply = dispatch(
            &state,
            Command::Set {
                work: "30".to_string(),
                short_break: "5".to_string(),
                long_break: "20".to_string(),
            },
        )
        .unwrap();
        assert!(reply.starts_with("New settings applied"));

        let status = dispatch(&state, Command::Status).unwrap();
        assert!(status.starts_with("[Ready] 30:00 (paused)"));
        assert!(status.contains("last action: apply-settings"));
    }
}
