//! Per-log competency scoring.
//!
//! Each calibration log is scored on five dimensions, each clamped into its
//! own `floor..=100` band:
//!
//! - **Evidence** (循证意识): how much of the observation the caregiver kept as
//!   evidence, with over-selection penalized, plus a small bonus for causal
//!   and sequential connectives.
//! - **Breadth** (领域视野): distinct developmental domains mentioned.
//! - **Depth** (领域深度): evidence phrase length blended with AI confidence.
//! - **Appropriateness** (适宜性把握): strategy and observation vocabulary density.
//! - **Reflection** (反思深度): how the caregiver edited the AI's evidence, with
//!   additions weighted 4x over removals.
//!
//! Scoring is total: empty text, empty evidence and absent confidence all
//! fall back to explicit defaults.

use std::collections::HashSet;
use std::sync::Arc;

use super::config::XpConfig;
use super::heuristics::{
    char_len, clamp, detect_domains, join_nonempty, normalize, normalize_evidence_text,
    KeywordCounter, LiteralCounter, CONNECTIVE_KEYWORDS, OBSERVATION_KEYWORDS, STRATEGY_KEYWORDS,
};
use crate::types::{CalibrationLog, LogScore, ScoredLog};

pub const EVIDENCE_FLOOR: f64 = 20.0;
/// Evidence floor when the caregiver selected nothing
pub const EVIDENCE_FLOOR_EMPTY: f64 = 5.0;
pub const BREADTH_FLOOR: f64 = 20.0;
pub const DEPTH_FLOOR: f64 = 20.0;
pub const APPROPRIATENESS_FLOOR: f64 = 15.0;
pub const REFLECTION_FLOOR: f64 = 30.0;

/// Coverage above this ratio means "selected everything"
const OVER_SELECTION_RATIO: f64 = 0.8;
const OVER_SELECTION_SCORE: f64 = 40.0;
const COVERAGE_BAND: (f64, f64) = (0.05, 0.5);
const COVERAGE_WEIGHT: f64 = 90.0;
const CONNECTIVE_BAND: (f64, f64) = (0.1, 0.6);
const CONNECTIVE_WEIGHT: f64 = 20.0;

const EVIDENCE_LENGTH_BAND: (f64, f64) = (25.0, 140.0);
const DEFAULT_DEPTH_CONFIDENCE: f64 = 0.55;

const STRATEGY_BAND: (f64, f64) = (0.15, 0.8);
const OBSERVATION_BAND: (f64, f64) = (0.1, 0.6);

const UNEDITED_CONFIDENT_CUTOFF: f64 = 0.8;
const UNEDITED_CONFIDENT_SCORE: f64 = 85.0;
const UNEDITED_SCORE: f64 = 50.0;
const ADDITION_WEIGHT: f64 = 0.8;
const REMOVAL_WEIGHT: f64 = 0.2;

/// Scores calibration logs and converts scores to XP
#[derive(Clone)]
pub struct LogScorer {
    counter: Arc<dyn KeywordCounter>,
    config: XpConfig,
}

impl Default for LogScorer {
    fn default() -> Self {
        Self::new(XpConfig::default())
    }
}

impl std::fmt::Debug for LogScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogScorer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Calibrated and AI evidence with empty entries dropped
struct EvidenceView<'a> {
    calibrated: Vec<&'a str>,
    ai: Vec<&'a str>,
    text: String,
    total_chars: usize,
}

impl<'a> EvidenceView<'a> {
    fn new(log: &'a CalibrationLog) -> Self {
        let calibrated: Vec<&str> = non_empty(&log.calibrated_evidence);
        let ai: Vec<&str> = non_empty(&log.ai_initial_evidence);
        let text = join_nonempty(&calibrated);
        let total_chars = char_len(&text);
        Self {
            calibrated,
            ai,
            text,
            total_chars,
        }
    }

    /// Hits per calibrated entry, 0 with no entries
    fn per_entry(&self, hits: usize) -> f64 {
        if self.calibrated.is_empty() {
            0.0
        } else {
            hits as f64 / self.calibrated.len() as f64
        }
    }
}

fn non_empty(entries: &[String]) -> Vec<&str> {
    entries
        .iter()
        .map(String::as_str)
        .filter(|entry| !entry.is_empty())
        .collect()
}

impl LogScorer {
    pub fn new(config: XpConfig) -> Self {
        Self::with_counter(config, Arc::new(LiteralCounter))
    }

    /// Use a custom keyword-counting strategy
    pub fn with_counter(config: XpConfig, counter: Arc<dyn KeywordCounter>) -> Self {
        Self { counter, config }
    }

    pub fn config(&self) -> &XpConfig {
        &self.config
    }

    /// Score one log on all five dimensions
    pub fn score_log(&self, log: &CalibrationLog) -> LogScore {
        let view = EvidenceView::new(log);

        let evidence = self.evidence_score(log, &view);
        let (breadth, domain_hits) = self.breadth_score(log, &view);
        let depth = self.depth_score(log, &view);
        let appropriateness = self.appropriateness_score(&view);
        let reflection = self.reflection_score(log, &view);

        let composite = (evidence + breadth + depth + appropriateness + reflection) / 5.0;

        LogScore {
            evidence,
            breadth,
            depth,
            appropriateness,
            reflection,
            composite,
            accumulation_eligible: composite >= self.config.quality_threshold,
            domain_hits,
        }
    }

    /// Score every log, keeping input order
    pub fn score_all<'a>(&self, logs: &'a [CalibrationLog]) -> Vec<ScoredLog<'a>> {
        logs.iter()
            .map(|log| ScoredLog {
                log,
                score: self.score_log(log),
            })
            .collect()
    }

    /// XP earned by one scored log: `round(composite * multiplier)` plus
    /// independent reflection, multi-domain and mastery bonuses
    pub fn xp_for_score(&self, score: &LogScore) -> u64 {
        let cfg = &self.config;
        let base = (score.composite * cfg.xp_base_multiplier).round().max(0.0) as u64;

        let mut bonus = 0;
        if score.reflection >= cfg.reflection_bonus_min {
            bonus += cfg.reflection_bonus;
        }
        if score.domain_hits >= cfg.multi_domain_min_hits {
            bonus += cfg.multi_domain_bonus;
        }
        if score.composite >= cfg.quality_threshold {
            bonus += cfg.mastery_bonus;
        }
        base + bonus
    }

    fn evidence_score(&self, log: &CalibrationLog, view: &EvidenceView<'_>) -> f64 {
        let original_len = char_len(&log.original_text);
        let coverage_ratio = if original_len == 0 {
            0.0
        } else {
            view.total_chars as f64 / original_len as f64
        };

        let coverage = if coverage_ratio > OVER_SELECTION_RATIO {
            OVER_SELECTION_SCORE
        } else {
            normalize(coverage_ratio, COVERAGE_BAND.0, COVERAGE_BAND.1) * COVERAGE_WEIGHT
        };

        let connective_hits = self.counter.count_hits(&view.text, CONNECTIVE_KEYWORDS);
        let connective = normalize(
            view.per_entry(connective_hits),
            CONNECTIVE_BAND.0,
            CONNECTIVE_BAND.1,
        ) * CONNECTIVE_WEIGHT;

        let floor = if view.calibrated.is_empty() {
            EVIDENCE_FLOOR_EMPTY
        } else {
            EVIDENCE_FLOOR
        };
        clamp(coverage + connective, floor, 100.0)
    }

    fn breadth_score(&self, log: &CalibrationLog, view: &EvidenceView<'_>) -> (f64, usize) {
        let context = format!(
            "{} {}",
            log.domain.as_deref().unwrap_or(""),
            join_nonempty(&[log.original_text.as_str(), view.text.as_str()])
        );
        let hits = detect_domains(&context).len();
        let score = match hits {
            0 => 20.0,
            1 => 45.0,
            2 => 70.0,
            _ => 90.0,
        };
        (clamp(score, BREADTH_FLOOR, 100.0), hits)
    }

    fn depth_score(&self, log: &CalibrationLog, view: &EvidenceView<'_>) -> f64 {
        let avg_length = view.per_entry(view.total_chars);
        let complexity =
            normalize(avg_length, EVIDENCE_LENGTH_BAND.0, EVIDENCE_LENGTH_BAND.1) * 100.0;
        let confidence = clamp(
            log.confidence.unwrap_or(DEFAULT_DEPTH_CONFIDENCE) * 100.0,
            30.0,
            100.0,
        );
        clamp(confidence * 0.5 + complexity * 0.5, DEPTH_FLOOR, 100.0)
    }

    fn appropriateness_score(&self, view: &EvidenceView<'_>) -> f64 {
        let strategy = normalize(
            view.per_entry(self.counter.count_hits(&view.text, STRATEGY_KEYWORDS)),
            STRATEGY_BAND.0,
            STRATEGY_BAND.1,
        );
        let observation = normalize(
            view.per_entry(self.counter.count_hits(&view.text, OBSERVATION_KEYWORDS)),
            OBSERVATION_BAND.0,
            OBSERVATION_BAND.1,
        );
        clamp((strategy + observation) / 2.0 * 100.0, APPROPRIATENESS_FLOOR, 100.0)
    }

    fn reflection_score(&self, log: &CalibrationLog, view: &EvidenceView<'_>) -> f64 {
        let ai_set: HashSet<String> = view.ai.iter().map(|e| normalize_evidence_text(e)).collect();
        let user_set: HashSet<String> = view
            .calibrated
            .iter()
            .map(|e| normalize_evidence_text(e))
            .collect();

        let added = user_set.difference(&ai_set).count();
        let removed = ai_set.difference(&user_set).count();
        let total_reference = (ai_set.len() + user_set.len()).max(1);
        let change_ratio = (added + removed) as f64 / total_reference as f64;

        if added + removed == 0 {
            // Leaving the AI result untouched only reads as sound judgement
            // when the AI itself was confident.
            return if log.confidence.unwrap_or(0.0) > UNEDITED_CONFIDENT_CUTOFF {
                UNEDITED_CONFIDENT_SCORE
            } else {
                UNEDITED_SCORE
            };
        }

        let addition_share = if user_set.is_empty() {
            0.0
        } else {
            added as f64 / user_set.len() as f64
        };
        let removal_share = if ai_set.is_empty() {
            0.0
        } else {
            removed as f64 / ai_set.len() as f64
        };

        let raw = (change_ratio * 0.5
            + (addition_share * ADDITION_WEIGHT + removal_share * REMOVAL_WEIGHT) * 0.5)
            * 100.0;
        clamp(raw, REFLECTION_FLOOR, 100.0)
    }
}

/// Score one log with the default configuration
pub fn score_log(log: &CalibrationLog) -> LogScore {
    LogScorer::default().score_log(log)
}
