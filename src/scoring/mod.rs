// Scoring Module - Calibration history to competency profile
//
// Components:
// - heuristics: keyword/pattern primitives over evidence text
// - scorer: five-dimension score and XP for a single log
// - aggregator: recency-decayed radar axes with maturity dampening
// - level: lifetime XP to level and title
// - evolution: AI/human agreement trend and domain mastery
// - config: tunable constants

pub mod aggregator;
pub mod config;
pub mod evolution;
pub mod heuristics;
pub mod level;
pub mod scorer;

pub use aggregator::{aggregate_dimension, calculate_radar_metrics, maturity_factor, Aggregator};
pub use config::{AggregationConfig, ConfigError, EvolutionConfig, LevelConfig, ScoringConfig, XpConfig};
pub use evolution::{calculate_ai_evolution, EvolutionTracker};
pub use heuristics::{KeywordCounter, LiteralCounter, RegexCounter};
pub use level::{calculate_level, LevelEngine};
pub use scorer::{score_log, LogScorer};
