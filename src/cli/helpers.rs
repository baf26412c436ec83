//! Shared helper functions for CLI commands
//!
//! Log file and config resolution, store opening and output format parsing.

use skillradar_core::{
    error::{RadarError, Result},
    JsonLogStore, LogStore, ScoringConfig, StatsEngine,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default log file path using XDG_DATA_HOME standard
pub fn get_default_logs_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skillradar")
        .join("logs.json")
}

/// Get the log file path from CLI arg, env var, or default
pub fn get_logs_path(cli_path: Option<String>) -> PathBuf {
    cli_path
        .or_else(|| std::env::var("SKILLRADAR_LOGS").ok())
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(get_default_logs_path)
}

/// Load scoring configuration from CLI arg or env var, defaults otherwise
pub fn load_config(cli_path: Option<String>) -> Result<ScoringConfig> {
    let path = cli_path
        .or_else(|| std::env::var("SKILLRADAR_CONFIG").ok())
        .filter(|path| !path.is_empty());

    match path {
        Some(path) => {
            debug!("Loading scoring config from {}", path);
            Ok(ScoringConfig::from_file(Path::new(&path))?)
        }
        None => Ok(ScoringConfig::default()),
    }
}

/// Open the log store
pub fn open_store(cli_path: Option<String>) -> Result<JsonLogStore> {
    let path = get_logs_path(cli_path);
    debug!("Using log store at {}", path.display());
    JsonLogStore::open(path)
}

/// Open the store, load the config and read every log, most recent first
pub fn load_logs_and_engine(
    logs_path: Option<String>,
    config_path: Option<String>,
) -> Result<(Vec<skillradar_core::CalibrationLog>, StatsEngine)> {
    let config = load_config(config_path)?;
    let store = open_store(logs_path)?;
    let logs = store.list_recent(None)?;
    Ok((logs, StatsEngine::new(&config)))
}

/// Output format for query commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(RadarError::Other(format!(
                "Unknown format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// Text progress bar for percentages
pub fn bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
