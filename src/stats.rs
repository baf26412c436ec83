//! Stats facade consumed by the dashboard.
//!
//! Composes the scorer, aggregator, level engine and evolution tracker into
//! the public queries. Every query takes the full log collection and keeps no
//! state between calls, so the same input always yields the same output.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::scoring::aggregator::Aggregator;
use crate::scoring::config::ScoringConfig;
use crate::scoring::evolution::EvolutionTracker;
use crate::scoring::heuristics::KeywordCounter;
use crate::scoring::level::LevelEngine;
use crate::scoring::scorer::LogScorer;
use crate::types::{
    recent_first, AIEvolutionStats, CalibrationLog, LogScore, RadarAxis, RadarMetric, UserStats,
};

pub use crate::scoring::evolution::calculate_ai_evolution;

const FIRST_OBSERVATION_PROMPT: &str = "开始您的第一次观察，点亮您的专业素养雷达。";
const STAGE_EMERGING: &str = "成长起步期：继续练习证据链与反思结构，稳固基础。";
const STAGE_DEVELOPING: &str = "稳步发展期：核心素养逐渐成型，可尝试拓宽领域视角。";
const STAGE_EXPERT: &str = "专家成熟期：洞察力稳定，建议聚焦跨情境迁移。";
const IMPROVEMENT_CUTOFF: u32 = 65;

/// One log's score and XP, for per-log inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBreakdown {
    pub id: String,
    pub timestamp: String,
    pub score: LogScore,
    pub xp: u64,
}

/// All stats queries, configured once
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    scorer: LogScorer,
    aggregator: Aggregator,
    levels: LevelEngine,
    evolution: EvolutionTracker,
}

impl StatsEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scorer: LogScorer::new(config.scoring.clone()),
            aggregator: Aggregator::new(config.aggregation.clone()),
            levels: LevelEngine::new(config.levels.clone()),
            evolution: EvolutionTracker::new(config.evolution.clone()),
        }
    }

    /// Swap the keyword-counting strategy used by the scorer
    pub fn with_counter(config: &ScoringConfig, counter: Arc<dyn KeywordCounter>) -> Self {
        Self {
            scorer: LogScorer::with_counter(config.scoring.clone(), counter),
            ..Self::new(config)
        }
    }

    /// Level, radar, counts and streak for the whole history
    pub fn user_stats(&self, logs: &[CalibrationLog]) -> UserStats {
        let scored = self.scorer.score_all(logs);
        let level = self.levels.level_for_scored(&self.scorer, &scored);
        let radar_data = self.aggregator.radar_metrics(&scored);
        let total_calibrations = logs.iter().filter(|log| log.is_calibrated()).count();
        let streak_days = compute_streak_days(logs);

        debug!(
            "Computed stats for {} logs: level {} ({} XP), streak {}",
            logs.len(),
            level.current_level,
            level.current_xp,
            streak_days
        );

        UserStats {
            level,
            radar_data,
            total_observations: logs.len(),
            total_calibrations,
            streak_days,
        }
    }

    pub fn ai_evolution(&self, logs: &[CalibrationLog]) -> AIEvolutionStats {
        let stats = self.evolution.calculate(logs);
        debug!(
            "Computed AI evolution over {} logs: average sync {}",
            logs.len(),
            stats.average_sync_score
        );
        stats
    }

    /// Per-log scores and XP, most recent first
    pub fn breakdown(&self, logs: &[CalibrationLog]) -> Vec<LogBreakdown> {
        recent_first(logs)
            .into_iter()
            .map(|log| {
                let score = self.scorer.score_log(log);
                LogBreakdown {
                    id: log.id.clone(),
                    timestamp: log.timestamp.clone(),
                    xp: self.scorer.xp_for_score(&score),
                    score,
                }
            })
            .collect()
    }
}

/// User stats with default settings
pub fn get_user_stats(logs: &[CalibrationLog]) -> UserStats {
    StatsEngine::default().user_stats(logs)
}

/// Short coaching text for a radar.
///
/// Ignores the cumulative-mastery axis, buckets the mean of the rest into a
/// maturity stage, praises the strongest axis and, when the weakest is below
/// 65, suggests working on it.
pub fn get_assessment_feedback(radar_data: &[RadarMetric]) -> String {
    let mut competencies: Vec<&RadarMetric> = radar_data
        .iter()
        .filter(|metric| metric.label != RadarAxis::Accumulation.label())
        .collect();
    if competencies.is_empty() {
        return FIRST_OBSERVATION_PROMPT.to_string();
    }

    let average = competencies.iter().map(|m| m.value as f64).sum::<f64>()
        / competencies.len() as f64;
    let stage = if average < 40.0 {
        STAGE_EMERGING
    } else if average < 70.0 {
        STAGE_DEVELOPING
    } else {
        STAGE_EXPERT
    };

    competencies.sort_by_key(|metric| metric.value);
    let mut parts = vec![stage.to_string()];
    if let Some(strongest) = competencies.last() {
        parts.push(format!("优势：{}。", strongest.label));
    }
    if let Some(weakest) = competencies.first().filter(|m| m.value < IMPROVEMENT_CUTOFF) {
        parts.push(format!("下一步：针对“{}”参考档位要求，专项打磨。", weakest.label));
    }
    parts.join(" ")
}

/// Consecutive-day streak ending at the most recent log, in local time
pub fn compute_streak_days(logs: &[CalibrationLog]) -> u32 {
    compute_streak_days_in(logs, &Local)
}

/// Consecutive-day streak with calendar days taken in `tz`.
///
/// Several logs on one day count once; any gap of more than a day ends the
/// run. Timestamps without an offset are wall-clock times in `tz`.
/// Unparsable timestamps count as the epoch.
pub fn compute_streak_days_in<Tz: TimeZone>(logs: &[CalibrationLog], tz: &Tz) -> u32 {
    let days: BTreeSet<NaiveDate> = logs
        .iter()
        .map(|log| {
            log.instant_in(tz)
                .unwrap_or_else(DateTime::<Utc>::default)
                .with_timezone(tz)
                .date_naive()
        })
        .collect();

    let mut descending = days.into_iter().rev();
    let Some(mut last) = descending.next() else {
        return 0;
    };

    let mut streak = 1;
    for day in descending {
        if (last - day).num_days() != 1 {
            break;
        }
        streak += 1;
        last = day;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(axis: RadarAxis, value: u32) -> RadarMetric {
        RadarMetric::new(axis, value)
    }

    fn on(ts: &str) -> CalibrationLog {
        CalibrationLog::new(ts, ts, "")
    }

    #[test]
    fn test_feedback_empty_radar() {
        assert_eq!(get_assessment_feedback(&[]), FIRST_OBSERVATION_PROMPT);
        assert_eq!(
            get_assessment_feedback(&[metric(RadarAxis::Accumulation, 90)]),
            FIRST_OBSERVATION_PROMPT
        );
    }

    #[test]
    fn test_feedback_emerging_with_improvement() {
        let radar = vec![
            metric(RadarAxis::Evidence, 30),
            metric(RadarAxis::Breadth, 20),
            metric(RadarAxis::Depth, 45),
            metric(RadarAxis::Appropriateness, 10),
            metric(RadarAxis::Reflection, 35),
            metric(RadarAxis::Accumulation, 100),
        ];
        assert_eq!(
            get_assessment_feedback(&radar),
            format!(
                "{} 优势：领域深度。 下一步：针对“适宜性把握”参考档位要求，专项打磨。",
                STAGE_EMERGING
            )
        );
    }

    #[test]
    fn test_feedback_expert_without_improvement() {
        let radar: Vec<RadarMetric> = RadarAxis::DECAYED
            .into_iter()
            .zip([80, 90, 70, 75, 85])
            .map(|(axis, value)| metric(axis, value))
            .collect();
        assert_eq!(
            get_assessment_feedback(&radar),
            format!("{} 优势：领域视野。", STAGE_EXPERT)
        );
    }

    #[test]
    fn test_feedback_developing_stage() {
        let radar: Vec<RadarMetric> = RadarAxis::DECAYED
            .into_iter()
            .map(|axis| metric(axis, 50))
            .collect();
        let text = get_assessment_feedback(&radar);
        assert!(text.starts_with(STAGE_DEVELOPING));
        // ties resolve to the last axis as strongest and the first as weakest
        assert!(text.contains("优势：反思深度。"));
        assert!(text.contains("“循证意识”"));
    }

    #[test]
    fn test_streak_consecutive_any_order() {
        let logs = vec![
            on("2024-01-02T10:00:00Z"),
            on("2024-01-03T10:00:00Z"),
            on("2024-01-01T10:00:00Z"),
        ];
        assert_eq!(compute_streak_days_in(&logs, &Utc), 3);
    }

    #[test]
    fn test_streak_gap_breaks() {
        let logs = vec![on("2024-01-01T10:00:00Z"), on("2024-01-05T10:00:00Z")];
        assert_eq!(compute_streak_days_in(&logs, &Utc), 1);
    }

    #[test]
    fn test_streak_same_day_does_not_break() {
        let logs = vec![
            on("2024-01-03T08:00:00Z"),
            on("2024-01-03T20:00:00Z"),
            on("2024-01-02T09:00:00Z"),
            on("2024-01-02T09:30:00Z"),
            on("2023-12-25T09:00:00Z"),
        ];
        assert_eq!(compute_streak_days_in(&logs, &Utc), 2);
    }

    #[test]
    fn test_streak_empty_and_invalid() {
        assert_eq!(compute_streak_days_in(&[], &Utc), 0);
        assert_eq!(compute_streak_days_in(&[on("garbage")], &Utc), 1);
    }

    #[test]
    fn test_streak_wall_clock_stays_on_its_day() {
        let eastern = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
        let same_day = vec![on("2024-01-01T01:00:00"), on("2024-01-01T23:00:00")];
        assert_eq!(compute_streak_days_in(&same_day, &eastern), 1);

        let consecutive = vec![on("2024-01-01T23:30"), on("2024-01-02 00:15")];
        assert_eq!(compute_streak_days_in(&consecutive, &eastern), 2);
    }

    #[test]
    fn test_streak_minute_precision_not_epoch() {
        let logs = vec![on("2024-01-05T10:30"), on("2024-01-06T09:00+0800")];
        assert_eq!(compute_streak_days_in(&logs, &Utc), 2);
    }

    #[test]
    fn test_streak_local_time() {
        let stamps: Vec<CalibrationLog> = [(2024, 3, 9), (2024, 3, 10), (2024, 3, 11)]
            .into_iter()
            .map(|(y, m, d)| {
                let local = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap();
                on(&local.to_rfc3339())
            })
            .collect();
        assert_eq!(compute_streak_days(&stamps), 3);
    }

    #[test]
    fn test_user_stats_counts() {
        let logs = vec![
            CalibrationLog::new("a", "2024-01-02T10:00:00Z", "孩子在跑")
                .with_evidence(["孩子在跑"], ["孩子在跑"]),
            CalibrationLog::new("b", "2024-01-01T10:00:00Z", "孩子在画画"),
        ];
        let stats = get_user_stats(&logs);
        assert_eq!(stats.total_observations, 2);
        assert_eq!(stats.total_calibrations, 1);
        assert_eq!(stats.radar_data.len(), 6);
        assert!(stats.level.current_xp > 0);
    }

    #[test]
    fn test_user_stats_empty() {
        let stats = get_user_stats(&[]);
        assert_eq!(stats.total_observations, 0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.level.current_level, 1);
        assert!(stats.radar_data.iter().all(|m| m.value == 0));
    }

    #[test]
    fn test_breakdown_most_recent_first() {
        let logs = vec![
            CalibrationLog::new("old", "2024-01-01", ""),
            CalibrationLog::new("new", "2024-01-02", ""),
        ];
        let rows = StatsEngine::default().breakdown(&logs);
        assert_eq!(rows[0].id, "new");
        assert_eq!(rows[1].xp, 12);
    }

    #[test]
    fn test_engine_honours_config() {
        let mut config = ScoringConfig::default();
        config.evolution.max_active_context = 1;
        config.aggregation.target_quality_logs = 1;

        let engine = StatsEngine::new(&config);
        let logs = vec![
            CalibrationLog::new("a", "2024-01-01", ""),
            CalibrationLog::new("b", "2024-01-02", ""),
        ];
        assert_eq!(engine.ai_evolution(&logs).active_context_count, 1);
        assert_eq!(engine.user_stats(&logs).radar_data[5].value, 0);
    }
}
