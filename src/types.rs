//! Core data types for the skillradar scoring system
//!
//! `CalibrationLog` is the only input: one record of an AI-proposed evidence
//! extraction together with the evidence set a caregiver confirmed. Every
//! other type here is derived from a collection of logs and recomputed on
//! each read; none of them is persisted.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One calibration record, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationLog {
    /// Opaque unique identifier
    pub id: String,

    /// ISO-8601 instant, kept verbatim. Unparsable values order as epoch 0.
    pub timestamp: String,

    /// Full raw observation text (may be empty)
    #[serde(default)]
    pub original_text: String,

    /// Evidence the AI model proposed, in order (duplicates possible)
    #[serde(default)]
    pub ai_initial_evidence: Vec<String>,

    /// Evidence the caregiver confirmed. Empty means "nothing selected".
    #[serde(default)]
    pub calibrated_evidence: Vec<String>,

    /// Developmental domain label, e.g. "科学" or "科学领域"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// AI self-reported confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl CalibrationLog {
    /// Create a log with no evidence, domain or confidence
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            original_text: original_text.into(),
            ai_initial_evidence: Vec::new(),
            calibrated_evidence: Vec::new(),
            domain: None,
            confidence: None,
        }
    }

    pub fn with_evidence<A, C>(mut self, ai: A, calibrated: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.ai_initial_evidence = ai.into_iter().map(Into::into).collect();
        self.calibrated_evidence = calibrated.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Parse the timestamp without resolving wall-clock values.
    ///
    /// Accepts RFC 3339 and the common ISO 8601 variants around it: `T` or a
    /// space between date and time, minute or second precision with optional
    /// fraction, and offsets written `Z`, `+08:00` or `+0800`. A date-time
    /// with no offset is wall-clock time; a bare `YYYY-MM-DD` is UTC midnight.
    pub fn log_time(&self) -> Option<LogTime> {
        let raw = self.timestamp.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(LogTime::Absolute(parsed.with_timezone(&Utc)));
        }

        let zoned = match raw.strip_suffix(['Z', 'z']) {
            Some(rest) => format!("{}+00:00", rest),
            None => raw.to_string(),
        };
        if let Some(parsed) = ZONED_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(&zoned, format).ok())
        {
            return Some(LogTime::Absolute(parsed.with_timezone(&Utc)));
        }

        if let Some(naive) = WALL_CLOCK_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(LogTime::WallClock(naive));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| LogTime::Absolute(naive.and_utc()))
    }

    /// The timestamp as an instant, with wall-clock values read in `tz`
    pub fn instant_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        self.log_time().map(|time| time.resolve(tz))
    }

    /// The timestamp as an instant, with wall-clock values read in local time
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant_in(&Local)
    }

    /// Timestamp as epoch milliseconds, 0 when missing or unparsable
    pub fn timestamp_millis(&self) -> i64 {
        self.instant().map(|t| t.timestamp_millis()).unwrap_or(0)
    }

    /// Whether the caregiver confirmed at least one evidence entry
    pub fn is_calibrated(&self) -> bool {
        !self.calibrated_evidence.is_empty()
    }
}

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const WALL_CLOCK_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed log timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTime {
    /// Carried an offset, or was a bare date
    Absolute(DateTime<Utc>),
    /// Date-time with no offset, meaningful only in some time zone
    WallClock(NaiveDateTime),
}

impl LogTime {
    /// Pin to an instant, reading wall-clock values in `tz`.
    ///
    /// A wall-clock time repeated by a DST fall-back takes the earlier
    /// instant; one skipped by a spring-forward is read as UTC.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        match self {
            LogTime::Absolute(instant) => *instant,
            LogTime::WallClock(naive) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .unwrap_or_else(|| naive.and_utc()),
        }
    }
}

/// Borrow `logs` ordered most-recent-first.
///
/// The sort is stable, so logs sharing a timestamp (or all falling back to
/// epoch 0) keep their incoming order.
pub fn recent_first(logs: &[CalibrationLog]) -> Vec<&CalibrationLog> {
    let mut ordered: Vec<(i64, &CalibrationLog)> =
        logs.iter().map(|log| (log.timestamp_millis(), log)).collect();
    ordered.sort_by(|a, b| b.0.cmp(&a.0));
    ordered.into_iter().map(|(_, log)| log).collect()
}

/// Per-log competency scores. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogScore {
    pub evidence: f64,
    pub breadth: f64,
    pub depth: f64,
    pub appropriateness: f64,
    pub reflection: f64,
    /// Mean of the five dimensions
    pub composite: f64,
    /// `composite` cleared the quality threshold
    pub accumulation_eligible: bool,
    /// Distinct developmental domains detected in the log's text
    pub domain_hits: usize,
}

impl LogScore {
    /// Read one decay-aggregated dimension
    pub fn dimension(&self, axis: RadarAxis) -> f64 {
        match axis {
            RadarAxis::Evidence => self.evidence,
            RadarAxis::Breadth => self.breadth,
            RadarAxis::Depth => self.depth,
            RadarAxis::Appropriateness => self.appropriateness,
            RadarAxis::Reflection => self.reflection,
            RadarAxis::Accumulation => {
                if self.accumulation_eligible {
                    100.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// A log paired with its score
#[derive(Debug, Clone, Copy)]
pub struct ScoredLog<'a> {
    pub log: &'a CalibrationLog,
    pub score: LogScore,
}

/// The six axes of the competency radar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarAxis {
    /// 循证意识
    Evidence,
    /// 领域视野
    Breadth,
    /// 领域深度
    Depth,
    /// 适宜性把握
    Appropriateness,
    /// 反思深度
    Reflection,
    /// 专业积累: count-based, never decayed
    Accumulation,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 6] = [
        RadarAxis::Evidence,
        RadarAxis::Breadth,
        RadarAxis::Depth,
        RadarAxis::Appropriateness,
        RadarAxis::Reflection,
        RadarAxis::Accumulation,
    ];

    /// The five axes computed by recency-decayed aggregation
    pub const DECAYED: [RadarAxis; 5] = [
        RadarAxis::Evidence,
        RadarAxis::Breadth,
        RadarAxis::Depth,
        RadarAxis::Appropriateness,
        RadarAxis::Reflection,
    ];

    /// Display label shown on the radar chart
    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::Evidence => "循证意识",
            RadarAxis::Breadth => "领域视野",
            RadarAxis::Depth => "领域深度",
            RadarAxis::Appropriateness => "适宜性把握",
            RadarAxis::Reflection => "反思深度",
            RadarAxis::Accumulation => "专业积累",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.label() == label)
    }
}

impl std::fmt::Display for RadarAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One point of the radar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarMetric {
    pub label: String,
    /// 0..=100
    pub value: u32,
    pub full_mark: u32,
}

impl RadarMetric {
    pub fn new(axis: RadarAxis, value: u32) -> Self {
        Self {
            label: axis.label().to_string(),
            value: value.min(100),
            full_mark: 100,
        }
    }
}

/// Lifetime XP progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLevel {
    /// 1-indexed level
    pub current_level: u32,
    pub current_title: String,
    pub current_xp: u64,
    /// XP at which the next level starts; a sentinel at max level
    pub next_level_xp: u64,
    /// 0..=100
    pub progress_percent: f64,
}

/// Snapshot consumed by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub level: UserLevel,
    pub radar_data: Vec<RadarMetric>,
    pub total_observations: usize,
    pub total_calibrations: usize,
    pub streak_days: u32,
}

/// AI/human agreement for one log in the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindSyncPoint {
    pub index: usize,
    /// 0..=100
    pub score: u32,
    pub timestamp: String,
}

/// How often a developmental domain appears across the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMastery {
    pub domain: String,
    /// 0..=100
    pub level: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIEvolutionStats {
    pub mind_sync_trend: Vec<MindSyncPoint>,
    pub domain_mastery: Vec<DomainMastery>,
    /// Historical logs that could serve as few-shot context
    pub active_context_count: usize,
    /// 0..=100
    pub average_sync_score: u32,
}
