//! Pomodoro Timer - A terminal countdown for work/break cycles
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::io::{self, BufReader};
use tracing::info;

use pomodoro_timer::{
    config::Config,
    services::alert_for,
    settings::SettingsStore,
    state::AppState,
    tasks::tick_driver_task,
    ui::{render_task, run_input, HELP_HINT},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the timer display on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));

    let store = SettingsStore::new(config.settings_path());
    let timer_config = store.load();
    let (work, short_break, long_break) = timer_config.as_minutes();
    info!(
        "Configuration: settings={}, work={}min, short break={}min, long break={}min",
        store.path().display(),
        work,
        short_break,
        long_break
    );

    // Create application state
    let state = Arc::new(AppState::new(timer_config, store, alert_for(config.sound())));

    // Start the countdown driver and the renderer
    let driver = tokio::spawn(tick_driver_task(Arc::clone(&state)));
    let renderer = tokio::spawn(render_task(Arc::clone(&state), io::stdout()));

    println!("{}", HELP_HINT);

    let input = run_input(&state, BufReader::new(io::stdin()), io::stdout());
    let signals = async {
        if let Err(e) = shutdown_signal().await {
            tracing::error!("Failed to listen for shutdown signals: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let interrupted = tokio::select! {
        result = input => {
            if let Err(e) = result {
                tracing::error!("Input error: {}", e);
            }
            false
        }
        _ = signals => {
            info!("Shutdown signal received");
            true
        }
    };

    driver.abort();
    renderer.abort();

    state.save_settings();
    info!("Shutdown complete");

    // The blocking stdin read cannot be cancelled and would hold up runtime shutdown
    if interrupted {
        std::process::exit(0);
    }
    Ok(())
}
