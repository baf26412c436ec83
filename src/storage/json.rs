//! JSON file backend for calibration logs
//!
//! The file holds `{"version": 1, "logs": [...]}`. It is read once on open
//! and rewritten in full on every change through a temporary file and a
//! rename, so a crash mid-write leaves the previous contents intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::{ensure_new, ordered, upsert, LogStore};
use crate::error::Result;
use crate::ingest;
use crate::types::CalibrationLog;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoreFile<'a> {
    version: u32,
    logs: &'a [CalibrationLog],
}

/// Log store persisted as a single JSON document
#[derive(Debug)]
pub struct JsonLogStore {
    path: PathBuf,
    logs: Vec<CalibrationLog>,
}

impl JsonLogStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let logs = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                let value: serde_json::Value = serde_json::from_str(&contents)?;
                ingest::normalize_logs(&value)?
            }
        } else {
            Vec::new()
        };

        debug!("Opened log store {} with {} logs", path.display(), logs.len());
        Ok(Self { path, logs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let document = StoreFile {
            version: FORMAT_VERSION,
            logs: &self.logs,
        };
        let json = serde_json::to_string_pretty(&document)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LogStore for JsonLogStore {
    fn list_recent(&self, limit: Option<usize>) -> Result<Vec<CalibrationLog>> {
        Ok(ordered(&self.logs, limit))
    }

    fn append(&mut self, log: CalibrationLog) -> Result<()> {
        ensure_new(&self.logs, &log)?;
        self.logs.push(log);
        self.persist()
    }

    fn import(&mut self, logs: Vec<CalibrationLog>) -> Result<usize> {
        let incoming = logs.len();
        let added = upsert(&mut self.logs, logs);
        self.persist()?;
        info!(
            "Imported {} logs into {} ({} new)",
            incoming,
            self.path.display(),
            added
        );
        Ok(added)
    }

    fn clear(&mut self) -> Result<()> {
        let removed = self.logs.len();
        self.logs.clear();
        self.persist()?;
        info!("Cleared {} logs from {}", removed, self.path.display());
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.logs.len())
    }
}
