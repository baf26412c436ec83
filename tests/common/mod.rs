//! Common test utilities and helpers

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use skillradar_core::CalibrationLog;

/// Evidence entry long enough to saturate depth, with one connective, one
/// strategy and one observation keyword
pub fn rich_evidence() -> String {
    format!("因为老师引导幼儿观察实验过程{}", "孩子专注地操作材料".repeat(15))
}

/// Observation text spanning three domains, about 1.5x the evidence length
pub fn rich_text() -> String {
    format!(
        "{}随后大家一起绘画并分享作品{}",
        rich_evidence(),
        "教室里很安静".repeat(10)
    )
}

/// RFC 3339 timestamp `days` days and `hours` hours after 2024-05-01T08:00Z
pub fn ts(days: i64, hours: i64) -> String {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    (base + Duration::days(days) + Duration::hours(hours)).to_rfc3339()
}

/// A log that clears the quality threshold: high coverage, three domains,
/// long keyword-rich evidence, AI left untouched with high confidence
pub fn eligible_log(id: &str, timestamp: &str) -> CalibrationLog {
    let evidence = rich_evidence();
    CalibrationLog::new(id, timestamp, rich_text())
        .with_evidence([evidence.clone()], [evidence])
        .with_domain("科学领域")
        .with_confidence(0.9)
}

/// A log with nothing in it
pub fn empty_log(id: &str, timestamp: &str) -> CalibrationLog {
    CalibrationLog::new(id, timestamp, "")
}

/// `count` eligible logs, one per day starting at day 0
pub fn eligible_history(count: usize) -> Vec<CalibrationLog> {
    (0..count)
        .map(|i| eligible_log(&format!("log-{}", i), &ts(i as i64, 0)))
        .collect()
}
