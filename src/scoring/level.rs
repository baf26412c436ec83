//! Lifetime XP leveling.
//!
//! XP is summed over the full history with no decay, then placed on a fixed
//! threshold table. Past the last threshold the level is open-ended.

use super::config::LevelConfig;
use super::heuristics::clamp;
use super::scorer::LogScorer;
use crate::types::{CalibrationLog, ScoredLog, UserLevel};

/// Maps cumulative XP onto the level table
#[derive(Debug, Clone, Default)]
pub struct LevelEngine {
    config: LevelConfig,
}

impl LevelEngine {
    pub fn new(config: LevelConfig) -> Self {
        Self { config }
    }

    /// Level, title and progress for a lifetime XP total
    pub fn level_for_xp(&self, current_xp: u64) -> UserLevel {
        let thresholds = &self.config.thresholds;
        let level_index = thresholds
            .iter()
            .take_while(|threshold| current_xp >= **threshold)
            .count()
            .saturating_sub(1);

        let is_max_level = level_index + 1 >= thresholds.len();
        let prev_level_xp = thresholds.get(level_index).copied().unwrap_or(0);

        let (next_level_xp, progress_percent) = if is_max_level {
            (self.config.max_level_sentinel, 100.0)
        } else {
            let next = thresholds[level_index + 1];
            let range = next.saturating_sub(prev_level_xp);
            let progress = if range == 0 {
                100.0
            } else {
                clamp(
                    current_xp.saturating_sub(prev_level_xp) as f64 / range as f64 * 100.0,
                    0.0,
                    100.0,
                )
            };
            (next, progress)
        };

        let current_title = self
            .config
            .titles
            .get(level_index)
            .or_else(|| self.config.titles.last())
            .cloned()
            .unwrap_or_default();

        UserLevel {
            current_level: level_index as u32 + 1,
            current_title,
            current_xp,
            next_level_xp,
            progress_percent,
        }
    }

    /// Level from already-scored logs
    pub fn level_for_scored(&self, scorer: &LogScorer, scored: &[ScoredLog<'_>]) -> UserLevel {
        let xp = scored
            .iter()
            .map(|item| scorer.xp_for_score(&item.score))
            .sum();
        self.level_for_xp(xp)
    }
}

/// Score every log and compute the resulting level with default settings
pub fn calculate_level(logs: &[CalibrationLog]) -> UserLevel {
    let scorer = LogScorer::default();
    let scored = scorer.score_all(logs);
    LevelEngine::default().level_for_scored(&scorer, &scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_xp() {
        let level = LevelEngine::default().level_for_xp(0);
        assert_eq!(level.current_level, 1);
        assert_eq!(level.current_title, "见习观察员");
        assert_eq!(level.next_level_xp, 300);
        assert_eq!(level.progress_percent, 0.0);
    }

    #[test]
    fn test_threshold_boundaries() {
        let engine = LevelEngine::default();
        assert_eq!(engine.level_for_xp(299).current_level, 1);
        assert_eq!(engine.level_for_xp(300).current_level, 2);
        assert_eq!(engine.level_for_xp(300).current_title, "初级分析师");
        assert_eq!(engine.level_for_xp(300).progress_percent, 0.0);
        assert_eq!(engine.level_for_xp(600).progress_percent, 50.0);
        assert_eq!(engine.level_for_xp(3200).current_title, "儿童解读大师");
    }

    #[test]
    fn test_max_level() {
        let engine = LevelEngine::default();
        for xp in [5000, 12_345, u64::MAX] {
            let level = engine.level_for_xp(xp);
            assert_eq!(level.current_level, 6);
            assert_eq!(level.current_title, "首席教研员");
            assert_eq!(level.next_level_xp, 999_999);
            assert_eq!(level.progress_percent, 100.0);
        }
    }

    #[test]
    fn test_monotonic_in_xp() {
        let engine = LevelEngine::default();
        let mut last = 0;
        for xp in (0..6000).step_by(7) {
            let level = engine.level_for_xp(xp).current_level;
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_calculate_level_sums_history() {
        // an empty observation earns 12 XP
        let logs: Vec<CalibrationLog> = (0..25)
            .map(|n| CalibrationLog::new(format!("l{n}"), "2024-01-01", ""))
            .collect();
        let level = calculate_level(&logs);
        assert_eq!(level.current_xp, 300);
        assert_eq!(level.current_level, 2);
        assert_eq!(calculate_level(&[]).current_xp, 0);
    }
}
