//! Fund dashboard - terminal view of fund performance and exposure
//!
//! Entry point for the dashboard application.

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use fund_dashboard::app::App;
use fund_dashboard::config;
use fund_dashboard::settings::DashboardSettings;

/// Log to a file; the terminal belongs to the UI
fn init_tracing() -> Result<()> {
    let dir = config::log_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = config::log_file();
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_tracing()?;

    let settings = DashboardSettings::load(&config::settings_file());
    // Load data before touching the terminal so errors print normally
    let mut app = App::new(&settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode()?;
        return Err(e.into());
    }

    let result = app.run();

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}
