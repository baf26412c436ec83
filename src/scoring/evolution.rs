//! AI/human agreement trend and per-domain mastery.
//!
//! Independent of the scoring pipeline: the trend compares raw evidence sets
//! of the most recent logs, and mastery counts domain labels across the whole
//! history.

use std::collections::{HashMap, HashSet};

use super::config::EvolutionConfig;
use crate::types::{recent_first, AIEvolutionStats, CalibrationLog, DomainMastery, MindSyncPoint};

const DOMAIN_SUFFIX: &str = "领域";

/// Computes AI evolution stats
#[derive(Debug, Clone, Default)]
pub struct EvolutionTracker {
    config: EvolutionConfig,
}

impl EvolutionTracker {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, logs: &[CalibrationLog]) -> AIEvolutionStats {
        if logs.is_empty() {
            return AIEvolutionStats::default();
        }

        let mut recent: Vec<&CalibrationLog> = recent_first(logs)
            .into_iter()
            .take(self.config.trend_window)
            .collect();
        recent.reverse();

        let mind_sync_trend: Vec<MindSyncPoint> = recent
            .iter()
            .enumerate()
            .map(|(index, log)| MindSyncPoint {
                index,
                score: sync_score(log),
                timestamp: log.timestamp.clone(),
            })
            .collect();

        let average_sync_score = if mind_sync_trend.is_empty() {
            0
        } else {
            let sum: u32 = mind_sync_trend.iter().map(|point| point.score).sum();
            (sum as f64 / mind_sync_trend.len() as f64).round() as u32
        };

        AIEvolutionStats {
            mind_sync_trend,
            domain_mastery: self.domain_mastery(logs),
            active_context_count: logs.len().min(self.config.max_active_context),
            average_sync_score,
        }
    }

    /// Top domains by occurrence across the whole history.
    ///
    /// Equal levels keep first-appearance order, so saturated domains rank
    /// by when they were first seen, not by raw count.
    pub fn domain_mastery(&self, logs: &[CalibrationLog]) -> Vec<DomainMastery> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for domain in logs.iter().filter_map(|log| log.domain.as_deref()) {
            let name = canonical_domain(domain);
            if name.is_empty() {
                continue;
            }
            let count = counts.entry(name.to_string()).or_insert(0);
            if *count == 0 {
                order.push(name.to_string());
            }
            *count += 1;
        }

        let mut mastery: Vec<DomainMastery> = order
            .into_iter()
            .map(|domain| {
                let count = counts.get(&domain).copied().unwrap_or(0);
                let level = (count as u64 * self.config.level_per_log as u64).min(100) as u32;
                DomainMastery {
                    domain,
                    level,
                    count,
                }
            })
            .collect();

        mastery.sort_by(|a, b| b.level.cmp(&a.level));
        mastery.truncate(self.config.top_domains);
        mastery
    }
}

/// Strip surrounding whitespace and a trailing "领域"
fn canonical_domain(label: &str) -> &str {
    let trimmed = label.trim();
    trimmed
        .strip_suffix(DOMAIN_SUFFIX)
        .unwrap_or(trimmed)
        .trim()
}

/// Jaccard agreement between AI and calibrated evidence, 0..=100.
///
/// Two empty sets agree perfectly.
pub fn sync_score(log: &CalibrationLog) -> u32 {
    let ai: HashSet<&str> = log.ai_initial_evidence.iter().map(|e| e.trim()).collect();
    let user: HashSet<&str> = log.calibrated_evidence.iter().map(|e| e.trim()).collect();

    if ai.is_empty() && user.is_empty() {
        return 100;
    }

    let intersection = user.intersection(&ai).count();
    let union = ai.union(&user).count();
    if union == 0 {
        return 0;
    }
    (intersection as f64 / union as f64 * 100.0).round() as u32
}

/// Evolution stats with default settings
pub fn calculate_ai_evolution(logs: &[CalibrationLog]) -> AIEvolutionStats {
    EvolutionTracker::default().calculate(logs)
}
