// Scoring Configuration
//
// The rolling window, decay factor, maturity curve, quality threshold, XP
// bonuses and level table are tuned constants rather than derived ones, so
// they live here as a TOML-loadable configuration surface. Defaults reproduce
// the production tuning.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Rolling-window aggregation and maturity dampening
    pub aggregation: AggregationConfig,

    /// Per-log quality threshold and XP rewards
    pub scoring: XpConfig,

    /// Level thresholds and titles
    pub levels: LevelConfig,

    /// AI agreement trend and domain mastery
    pub evolution: EvolutionConfig,
}

/// Configuration for radar aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Most recent logs considered per dimension
    pub window_size: usize,

    /// Weight multiplier applied per step back in the window
    pub decay_factor: f64,

    /// maturity = log2(count + 2) / maturity_divisor, clamped to [floor, ceiling]
    pub maturity_divisor: f64,
    pub maturity_floor: f64,
    pub maturity_ceiling: f64,

    /// Eligible logs needed to fill the cumulative-mastery axis
    pub target_quality_logs: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            decay_factor: 0.95,
            maturity_divisor: 4.2,
            maturity_floor: 0.3,
            maturity_ceiling: 1.0,
            target_quality_logs: 50,
        }
    }
}

/// Configuration for per-log XP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpConfig {
    /// Composite score at which a log counts toward cumulative mastery
    pub quality_threshold: f64,

    /// XP = round(composite * xp_base_multiplier) + bonuses
    pub xp_base_multiplier: f64,

    /// Reflection dimension >= reflection_bonus_min
    pub reflection_bonus: u64,
    pub reflection_bonus_min: f64,

    /// Two or more domains detected
    pub multi_domain_bonus: u64,
    pub multi_domain_min_hits: usize,

    /// Composite cleared the quality threshold
    pub mastery_bonus: u64,
}

impl Default for XpConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 75.0,
            xp_base_multiplier: 0.5,
            reflection_bonus: 10,
            reflection_bonus_min: 75.0,
            multi_domain_bonus: 10,
            multi_domain_min_hits: 2,
            mastery_bonus: 15,
        }
    }
}

/// Level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Cumulative XP at which each level starts; first entry must be 0
    pub thresholds: Vec<u64>,

    /// One title per threshold
    pub titles: Vec<String>,

    /// `next_level_xp` reported once the last level is reached
    pub max_level_sentinel: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![0, 300, 900, 1800, 3200, 5000],
            titles: ["见习观察员", "初级分析师", "资深研习者", "评价素养专家", "儿童解读大师", "首席教研员"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            max_level_sentinel: 999_999,
        }
    }
}

/// Configuration for the AI evolution view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Most recent logs shown in the agreement trend
    pub trend_window: usize,

    /// Upper bound on logs usable as few-shot context
    pub max_active_context: usize,

    /// Domains reported in the mastery list
    pub top_domains: usize,

    /// Mastery level gained per occurrence of a domain
    pub level_per_log: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            trend_window: 10,
            max_active_context: 15,
            top_domains: 3,
            level_per_log: 10,
        }
    }
}

impl ScoringConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let agg = &self.aggregation;
        if agg.window_size == 0 {
            return Err(ConfigError::ValidationError(
                "aggregation: window_size must be greater than 0".to_string(),
            ));
        }
        if !(agg.decay_factor > 0.0 && agg.decay_factor <= 1.0) {
            return Err(ConfigError::ValidationError(
                "aggregation: decay_factor must be in (0, 1]".to_string(),
            ));
        }
        if !(agg.maturity_divisor > 0.0) {
            return Err(ConfigError::ValidationError(
                "aggregation: maturity_divisor must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&agg.maturity_floor)
            || !(0.0..=1.0).contains(&agg.maturity_ceiling)
            || agg.maturity_floor > agg.maturity_ceiling
        {
            return Err(ConfigError::ValidationError(
                "aggregation: maturity band must satisfy 0 <= floor <= ceiling <= 1".to_string(),
            ));
        }
        if agg.target_quality_logs == 0 {
            return Err(ConfigError::ValidationError(
                "aggregation: target_quality_logs must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.scoring.quality_threshold) {
            return Err(ConfigError::ValidationError(
                "scoring: quality_threshold must be between 0 and 100".to_string(),
            ));
        }
        if !(self.scoring.xp_base_multiplier >= 0.0) {
            return Err(ConfigError::ValidationError(
                "scoring: xp_base_multiplier must not be negative".to_string(),
            ));
        }

        self.validate_levels()?;

        if self.evolution.trend_window == 0 {
            return Err(ConfigError::ValidationError(
                "evolution: trend_window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_levels(&self) -> Result<(), ConfigError> {
        let levels = &self.levels;
        if levels.thresholds.first() != Some(&0) {
            return Err(ConfigError::ValidationError(
                "levels: thresholds must start at 0".to_string(),
            ));
        }
        if levels.thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::ValidationError(
                "levels: thresholds must be strictly increasing".to_string(),
            ));
        }
        if levels.titles.len() != levels.thresholds.len() {
            return Err(ConfigError::ValidationError(format!(
                "levels: expected {} titles, found {}",
                levels.thresholds.len(),
                levels.titles.len()
            )));
        }
        if levels.thresholds.last().is_some_and(|last| levels.max_level_sentinel <= *last) {
            return Err(ConfigError::ValidationError(
                "levels: max_level_sentinel must exceed the last threshold".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
