//! Log import command
//!
//! Accepts loosely typed JSON (an array, or an object with a `logs` array)
//! and bulk-puts the normalized records into the store.

use anyhow::Context;
use skillradar_core::{error::Result, ingest, LogStore};
use std::path::PathBuf;
use tracing::debug;

use super::helpers::open_store;

/// Handle import command
pub fn handle(input: PathBuf, logs_path: Option<String>) -> Result<()> {
    debug!("Importing logs from {}", input.display());
    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let logs = ingest::parse_logs(&contents)?;
    let total = logs.len();

    let mut store = open_store(logs_path)?;
    let added = store.import(logs)?;

    println!(
        "Imported {} log(s) from {} ({} new, {} replaced); {} stored",
        total,
        input.display(),
        added,
        total - added,
        store.len()?
    );
    Ok(())
}
