//! End-to-end stats queries over realistic log histories

mod common;

use chrono::Utc;
use common::{eligible_history, eligible_log, empty_log, ts};
use skillradar_core::{
    calculate_ai_evolution, calculate_level, calculate_radar_metrics, get_assessment_feedback,
    get_user_stats, score_log, stats::compute_streak_days_in, CalibrationLog, RadarAxis,
    RadarMetric, ScoringConfig, StatsEngine,
};

fn axis_value(radar: &[RadarMetric], axis: RadarAxis) -> u32 {
    radar
        .iter()
        .find(|metric| metric.label == axis.label())
        .map(|metric| metric.value)
        .unwrap()
}

#[test]
fn test_fixture_log_is_eligible() {
    let score = score_log(&eligible_log("a", &ts(0, 0)));
    assert!(score.accumulation_eligible, "composite {}", score.composite);
    assert_eq!(score.domain_hits, 3);
}

#[test]
fn test_twenty_eligible_logs_end_to_end() {
    let logs = eligible_history(20);
    let stats = get_user_stats(&logs);

    assert_eq!(stats.total_observations, 20);
    assert_eq!(stats.total_calibrations, 20);
    assert_eq!(stats.streak_days, compute_streak_days_in(&logs, &chrono::Local));

    assert_eq!(stats.radar_data.len(), 6);
    assert_eq!(axis_value(&stats.radar_data, RadarAxis::Accumulation), 40);
    for axis in RadarAxis::DECAYED {
        assert!(
            axis_value(&stats.radar_data, axis) > 60,
            "{} = {}",
            axis,
            axis_value(&stats.radar_data, axis)
        );
    }

    // 94 composite: 47 base + reflection, multi-domain and mastery bonuses
    assert_eq!(stats.level.current_xp, 20 * 82);
    assert_eq!(stats.level.current_level, 3);

    let feedback = get_assessment_feedback(&stats.radar_data);
    assert!(feedback.starts_with("专家成熟期"));
    assert!(!feedback.contains("下一步"));
}

#[test]
fn test_empty_history() {
    let stats = get_user_stats(&[]);
    assert_eq!(stats.total_observations, 0);
    assert_eq!(stats.streak_days, 0);
    assert_eq!(stats.level.current_level, 1);
    assert_eq!(stats.level.current_xp, 0);
    assert_eq!(stats.level.next_level_xp, 300);
    assert_eq!(stats.level.progress_percent, 0.0);
    assert!(stats.radar_data.iter().all(|metric| metric.value == 0));

    assert_eq!(calculate_ai_evolution(&[]), Default::default());
}

#[test]
fn test_accumulation_counts_eligible_logs_only() {
    let mut logs = eligible_history(25);
    logs.extend((0..25).map(|i| empty_log(&format!("empty-{}", i), &ts(30 + i, 0))));

    let radar = calculate_radar_metrics(&logs);
    assert_eq!(axis_value(&radar, RadarAxis::Accumulation), 50);
}

#[test]
fn test_decayed_axes_follow_recent_logs() {
    // Old high-quality history followed by a window of empty logs
    let mut logs = eligible_history(10);
    logs.extend((0..20).map(|i| empty_log(&format!("empty-{}", i), &ts(20 + i, 0))));

    let radar = calculate_radar_metrics(&logs);
    assert!(axis_value(&radar, RadarAxis::Evidence) < 10);
    assert_eq!(axis_value(&radar, RadarAxis::Accumulation), 20);
}

#[test]
fn test_level_boundaries_from_logs() {
    assert_eq!(calculate_level(&[]).current_level, 1);

    // An empty log earns 12 XP; 25 of them land exactly on 300
    let logs: Vec<CalibrationLog> = (0..25)
        .map(|i| empty_log(&format!("e{}", i), &ts(i, 0)))
        .collect();
    let level = calculate_level(&logs);
    assert_eq!(level.current_xp, 300);
    assert_eq!(level.current_level, 2);
    assert_eq!(level.next_level_xp, 900);
    assert_eq!(level.progress_percent, 0.0);
}

#[test]
fn test_streak_spans_consecutive_days() {
    let logs = vec![
        empty_log("a", &ts(0, 0)),
        empty_log("b", &ts(1, 0)),
        empty_log("c", &ts(2, 0)),
        empty_log("d", &ts(2, 3)),
    ];
    assert_eq!(compute_streak_days_in(&logs, &Utc), 3);

    let gapped = vec![empty_log("a", &ts(0, 0)), empty_log("b", &ts(2, 0))];
    assert_eq!(compute_streak_days_in(&gapped, &Utc), 1);
}

#[test]
fn test_ai_evolution_agreement() {
    let agree = CalibrationLog::new("agree", ts(0, 0), "")
        .with_evidence(["a", "b"], ["a", "b"])
        .with_domain("科学领域");
    let disagree = CalibrationLog::new("disagree", ts(1, 0), "")
        .with_evidence(["a"], ["b"])
        .with_domain("科学");

    let stats = calculate_ai_evolution(&[disagree, agree]);
    let scores: Vec<u32> = stats.mind_sync_trend.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![100, 0]);
    assert_eq!(stats.average_sync_score, 50);
    assert_eq!(stats.active_context_count, 2);

    assert_eq!(stats.domain_mastery.len(), 1);
    assert_eq!(stats.domain_mastery[0].domain, "科学");
    assert_eq!(stats.domain_mastery[0].count, 2);
    assert_eq!(stats.domain_mastery[0].level, 20);
}

#[test]
fn test_queries_are_idempotent_and_order_independent() {
    let mut logs = eligible_history(5);
    logs.push(empty_log("bad-ts", "not a date"));
    logs.push(
        CalibrationLog::new("partial", ts(9, 0), "孩子们在讲述故事")
            .with_evidence(["讲述故事"], ["讲述故事", "主动表达"])
            .with_confidence(0.4),
    );

    let first = get_user_stats(&logs);
    assert_eq!(first, get_user_stats(&logs));

    let mut reversed = logs.clone();
    reversed.reverse();
    let second = get_user_stats(&reversed);
    assert_eq!(first.radar_data, second.radar_data);
    assert_eq!(first.level, second.level);

    assert_eq!(calculate_ai_evolution(&logs), calculate_ai_evolution(&logs));
}

#[test]
fn test_engine_honours_config() {
    let config = ScoringConfig::from_toml(
        r#"
[aggregation]
target_quality_logs = 10

[levels]
thresholds = [0, 100]
titles = ["新手", "熟手"]
"#,
    )
    .unwrap();
    let engine = StatsEngine::new(&config);

    let logs = eligible_history(5);
    let stats = engine.user_stats(&logs);
    assert_eq!(axis_value(&stats.radar_data, RadarAxis::Accumulation), 50);
    assert_eq!(stats.level.current_level, 2);
    assert_eq!(stats.level.current_title, "熟手");
    assert_eq!(stats.level.progress_percent, 100.0);
}
