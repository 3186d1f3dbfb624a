use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analyser::logic::{DEFAULT_DATASET, DEFAULT_TOP_AUTHORS, DEFAULT_TOP_PUBLISHERS};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "BOOKSTATS_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Catalog loaded when no `--file` is given
    pub default_dataset: PathBuf,
    pub top_authors: usize,
    pub top_publishers: usize,
    /// Whether text charts are drawn under the tables
    pub show_charts: bool,
    /// Width in terminal cells of the longest chart bar
    pub chart_width: usize,
    /// Rows shown in the dataset overview preview (default: 30)
    pub preview_rows: usize,
    /// Also write a daily-rotated log file to the data directory
    pub log_to_file: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_dataset: PathBuf::from(DEFAULT_DATASET),
            top_authors: DEFAULT_TOP_AUTHORS,
            top_publishers: DEFAULT_TOP_PUBLISHERS,
            show_charts: true,
            chart_width: 40,
            preview_rows: 30,
            log_to_file: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub settings: AppSettings,
}

impl AppConfig {
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }
}

/// `<config dir>/bookstats/config.json`, or `./bookstats/config.json` when the
/// platform has no config directory.
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookstats")
        .join("config.json")
}

/// Reads the config at `path`, or at [`get_config_path`] when `None`.
///
/// A missing or unparsable file yields the defaults; the tool must start
/// without any configuration present.
pub fn load_app_config(path: Option<&Path>) -> AppConfig {
    let path = path.map_or_else(get_config_path, Path::to_path_buf);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return AppConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring config at {}: {e:#}", path.display());
            AppConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse JSON config")
}
