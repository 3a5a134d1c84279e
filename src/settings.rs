//! Dashboard settings
//!
//! YAML file with theme, table and data preferences. Every field has a
//! default so partial files load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::table::Density;

/// Settings schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub table: TableSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default = "default_theme_mode")]
    pub mode: String, // light, dark
    /// Hex override for the primary color
    #[serde(default)]
    pub accent: Option<String>,
}

fn default_theme_mode() -> String {
    "light".to_string()
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: default_theme_mode(),
            accent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub density: Density,
}

fn default_page_size() -> usize {
    8
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            density: Density::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Fund data file; `FUND_DASHBOARD_DATA` takes precedence
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DashboardSettings {
    /// Load settings from file, defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is valid and means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Data file to load: environment first, then settings
    pub fn data_path(&self) -> Option<PathBuf> {
        crate::config::data_file().or_else(|| self.data.path.clone())
    }
}
