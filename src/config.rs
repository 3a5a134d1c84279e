//! Runtime configuration from environment variables
//!
//! All functions fall back to sensible defaults when env vars are not set.

use std::path::PathBuf;

/// Fund data file replacing the built-in dataset. Set with `FUND_DASHBOARD_DATA`.
pub fn data_file() -> Option<PathBuf> {
    std::env::var("FUND_DASHBOARD_DATA")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Settings file. Override with `FUND_DASHBOARD_SETTINGS`.
pub fn settings_file() -> PathBuf {
    if let Ok(path) = std::env::var("FUND_DASHBOARD_SETTINGS") {
        return PathBuf::from(path);
    }
    // Try XDG config dir first
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("fund-dashboard").join("settings.yaml");
    }
    PathBuf::from(".fund-dashboard-settings.yaml")
}

/// Directory for the log file. Override with `FUND_DASHBOARD_LOG_DIR`.
pub fn log_dir() -> PathBuf {
    std::env::var("FUND_DASHBOARD_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir())
}

/// Path to the log file
pub fn log_file() -> PathBuf {
    log_dir().join("fund-dashboard.log")
}
