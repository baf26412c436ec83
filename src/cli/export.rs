//! Log export command

use serde::Serialize;
use skillradar_core::{error::Result, CalibrationLog, LogStore};
use std::io::Write;
use tracing::debug;

use super::helpers::open_store;

#[derive(Serialize)]
struct ExportDocument<'a> {
    version: u32,
    logs: &'a [CalibrationLog],
}

/// Handle export command
pub fn handle(output: Option<String>, logs_path: Option<String>) -> Result<()> {
    let store = open_store(logs_path)?;
    let logs = store.list_recent(None)?;

    let json = serde_json::to_string_pretty(&ExportDocument {
        version: 1,
        logs: &logs,
    })?;

    match output {
        Some(path) => {
            debug!("Exporting {} logs to {}...", logs.len(), path);
            std::fs::write(&path, format!("{}\n", json))?;
            eprintln!("Exported {} log(s) to {}", logs.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
