//! Bulk clear command

use skillradar_core::{error::Result, LogStore};
use tracing::warn;

use super::helpers::open_store;

/// Handle clear command
pub fn handle(yes: bool, logs_path: Option<String>) -> Result<()> {
    let mut store = open_store(logs_path)?;
    let count = store.len()?;

    if !yes {
        warn!("Refusing to clear without --yes");
        println!(
            "This would delete all {} calibration log(s) in {}. Re-run with --yes to confirm.",
            count,
            store.path().display()
        );
        return Ok(());
    }

    store.clear()?;
    println!("Cleared {} calibration log(s)", count);
    Ok(())
}
