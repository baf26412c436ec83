//! Boundary normalization of loosely typed log records.
//!
//! Records arrive as JSON shaped by whichever client or AI adapter produced
//! them: ids may be numbers, evidence may be a bare string or contain nulls,
//! confidence may be a numeric string. Everything is coerced into a strict
//! [`CalibrationLog`] here so the scoring code never sees loose input.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{RadarError, Result};
use crate::types::CalibrationLog;

/// Coerce one JSON record into a calibration log.
///
/// Only non-object input is rejected; every field has an explicit default.
pub fn normalize_log(value: &Value) -> Result<CalibrationLog> {
    let record = value.as_object().ok_or_else(|| {
        RadarError::InvalidLog(format!("expected an object, found {}", kind(value)))
    })?;

    let id = field(record, &["id"])
        .and_then(scalar_to_string)
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            debug!("Record without id, assigned {}", generated);
            generated
        });

    Ok(CalibrationLog {
        id,
        timestamp: field(record, &["timestamp"])
            .map(timestamp_string)
            .unwrap_or_default(),
        original_text: field(record, &["originalText", "original_text"])
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        ai_initial_evidence: field(record, &["aiInitialEvidence", "ai_initial_evidence"])
            .map(string_list)
            .unwrap_or_default(),
        calibrated_evidence: field(record, &["calibratedEvidence", "calibrated_evidence"])
            .map(string_list)
            .unwrap_or_default(),
        domain: field(record, &["domain"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .map(str::to_string),
        confidence: field(record, &["confidence"]).and_then(confidence),
    })
}

/// Coerce a batch: either an array of records or an object with a `logs`
/// array. Records that are not objects are skipped with a warning.
pub fn normalize_logs(value: &Value) -> Result<Vec<CalibrationLog>> {
    let records = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("logs") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(RadarError::InvalidLog(
                    "expected an array of logs or an object with a `logs` array".to_string(),
                ))
            }
        },
        other => {
            return Err(RadarError::InvalidLog(format!(
                "expected an array of logs, found {}",
                kind(other)
            )))
        }
    };

    let mut logs = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match normalize_log(record) {
            Ok(log) => logs.push(log),
            Err(e) => warn!("Skipping record {}: {}", position, e),
        }
    }
    Ok(logs)
}

/// Parse JSON text and normalize it as a batch
pub fn parse_logs(json: &str) -> Result<Vec<CalibrationLog>> {
    let value: Value = serde_json::from_str(json)?;
    normalize_logs(&value)
}

fn field<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Strings are kept verbatim; numbers are read as epoch milliseconds
fn timestamp_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn confidence(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    raw.is_finite().then(|| raw.clamp(0.0, 1.0))
}
