//! Skillradar - Competency scoring for calibrated child observations
//!
//! Caregivers submit observations, an AI model proposes evidence, and the
//! caregiver calibrates it. This crate turns the resulting history of
//! calibration logs into:
//! - a six-axis competency radar (recency-decayed, maturity-dampened)
//! - a lifetime XP level and title
//! - an AI/human agreement trend and per-domain mastery
//!
//! # Architecture
//!
//! - **Types**: CalibrationLog input and the derived stats types
//! - **Ingest**: coercion of loosely typed JSON records into CalibrationLog
//! - **Scoring**: text heuristics, per-log scoring, aggregation, leveling
//! - **Stats**: the facade the dashboard queries
//! - **Storage**: an ordered, durable collection of logs
//!
//! Every stats query is a pure function of the log collection passed in.
//!
//! # Example
//!
//! ```
//! use skillradar_core::{get_assessment_feedback, get_user_stats, CalibrationLog};
//!
//! let logs = vec![
//!     CalibrationLog::new("1", "2024-05-01T09:00:00Z", "孩子们用磁铁做实验，比较哪块吸得多")
//!         .with_evidence(["用磁铁做实验"], ["用磁铁做实验", "比较哪块吸得多"])
//!         .with_domain("科学领域")
//!         .with_confidence(0.85),
//! ];
//!
//! let stats = get_user_stats(&logs);
//! assert_eq!(stats.total_observations, 1);
//! let _feedback = get_assessment_feedback(&stats.radar_data);
//! ```

pub mod error;
pub mod ingest;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{RadarError, Result};
pub use scoring::{calculate_level, calculate_radar_metrics, score_log, ScoringConfig};
pub use stats::{
    calculate_ai_evolution, compute_streak_days, get_assessment_feedback, get_user_stats,
    StatsEngine,
};
pub use storage::{JsonLogStore, LogStore, MemoryLogStore};
pub use types::{
    AIEvolutionStats, CalibrationLog, DomainMastery, LogScore, LogTime, MindSyncPoint,
    RadarAxis, RadarMetric, UserLevel, UserStats,
};
