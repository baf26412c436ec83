//! Storage layer for calibration logs
//!
//! The scoring core only needs "all logs, ordered by timestamp". This module
//! provides that as a small trait with an in-memory backend and a JSON file
//! backend. Logs are keyed by id, never edited, and only removed by clearing
//! the whole collection.

pub mod json;

use std::collections::HashSet;

use crate::error::{RadarError, Result};
use crate::types::{recent_first, CalibrationLog};

pub use json::JsonLogStore;

/// Durable ordered collection of calibration logs
pub trait LogStore {
    /// Logs ordered most recent first, optionally limited
    fn list_recent(&self, limit: Option<usize>) -> Result<Vec<CalibrationLog>>;

    /// Add a new log; fails if the id is already stored
    fn append(&mut self, log: CalibrationLog) -> Result<()>;

    /// Insert or replace logs by id. Returns how many ids were new.
    fn import(&mut self, logs: Vec<CalibrationLog>) -> Result<usize>;

    /// Remove every log
    fn clear(&mut self) -> Result<()>;

    /// Number of stored logs
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Keeps logs in memory; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryLogStore {
    logs: Vec<CalibrationLog>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_logs(logs: Vec<CalibrationLog>) -> Self {
        let mut store = Self::new();
        upsert(&mut store.logs, logs);
        store
    }
}

impl LogStore for MemoryLogStore {
    fn list_recent(&self, limit: Option<usize>) -> Result<Vec<CalibrationLog>> {
        Ok(ordered(&self.logs, limit))
    }

    fn append(&mut self, log: CalibrationLog) -> Result<()> {
        ensure_new(&self.logs, &log)?;
        self.logs.push(log);
        Ok(())
    }

    fn import(&mut self, logs: Vec<CalibrationLog>) -> Result<usize> {
        Ok(upsert(&mut self.logs, logs))
    }

    fn clear(&mut self) -> Result<()> {
        self.logs.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.logs.len())
    }
}

pub(crate) fn ordered(logs: &[CalibrationLog], limit: Option<usize>) -> Vec<CalibrationLog> {
    recent_first(logs)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

pub(crate) fn ensure_new(logs: &[CalibrationLog], log: &CalibrationLog) -> Result<()> {
    if logs.iter().any(|existing| existing.id == log.id) {
        return Err(RadarError::AlreadyExists(log.id.clone()));
    }
    Ok(())
}

/// Bulk put keyed by id; later duplicates within `incoming` win
pub(crate) fn upsert(logs: &mut Vec<CalibrationLog>, incoming: Vec<CalibrationLog>) -> usize {
    let mut known: HashSet<String> = logs.iter().map(|log| log.id.clone()).collect();
    let mut added = 0;
    for log in incoming {
        if known.contains(&log.id) {
            if let Some(slot) = logs.iter_mut().find(|existing| existing.id == log.id) {
                *slot = log;
            }
        } else {
            known.insert(log.id.clone());
            logs.push(log);
            added += 1;
        }
    }
    added
}
