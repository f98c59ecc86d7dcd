//! CLI subcommands.

pub mod batch;
pub mod check;
pub mod config;
pub mod scan;

use std::path::{Path, PathBuf};

use tracing::debug;

use cardscan_core::models::config::CardScanConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscan")
        .join("config.json")
}

/// Resolve the configuration file path from `--config` or the default.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration from an explicit path, the default path if it
/// exists, or built-in defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<CardScanConfig> {
    if let Some(path) = explicit {
        return Ok(CardScanConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(CardScanConfig::from_file(&path)?)
    } else {
        Ok(CardScanConfig::default())
    }
}
