//! Radar aggregation over scored logs.
//!
//! The five competency axes are recency-weighted averages over a rolling
//! window of the most recent logs, dampened by a maturity factor computed
//! over the whole history. The cumulative-mastery axis is instead a count of
//! eligible logs across the whole history and never decays.

use super::config::AggregationConfig;
use super::heuristics::clamp;
use super::scorer::LogScorer;
use crate::types::{CalibrationLog, LogScore, RadarAxis, RadarMetric, ScoredLog};

/// Computes radar metrics from scored logs
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// The most recent `window_size` logs, newest first
    fn window<'s, 'a>(&self, scored: &'s [ScoredLog<'a>]) -> Vec<&'s ScoredLog<'a>> {
        let mut ordered: Vec<(i64, &ScoredLog<'a>)> = scored
            .iter()
            .map(|item| (item.log.timestamp_millis(), item))
            .collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));
        ordered
            .into_iter()
            .take(self.config.window_size)
            .map(|(_, item)| item)
            .collect()
    }

    fn weighted_average<F>(&self, window: &[&ScoredLog<'_>], accessor: F) -> f64
    where
        F: Fn(&LogScore) -> f64,
    {
        let mut weight = 1.0;
        let mut weight_sum = 0.0;
        let mut total = 0.0;
        for item in window {
            total += accessor(&item.score) * weight;
            weight_sum += weight;
            weight *= self.config.decay_factor;
        }
        if weight_sum == 0.0 {
            0.0
        } else {
            total / weight_sum
        }
    }

    /// Recency-weighted average of one dimension over the rolling window.
    ///
    /// Logs are re-sorted newest first (unparsable timestamps count as epoch
    /// 0); the newest has weight 1.0 and each older log is multiplied by the
    /// decay factor. Returns 0 for no logs.
    pub fn aggregate_dimension<F>(&self, scored: &[ScoredLog<'_>], accessor: F) -> f64
    where
        F: Fn(&LogScore) -> f64,
    {
        let window = self.window(scored);
        self.weighted_average(&window, accessor)
    }

    /// `clamp(log2(count + 2) / divisor, floor, ceiling)` over the whole history
    pub fn maturity_factor(&self, total_logs: usize) -> f64 {
        let cfg = &self.config;
        clamp(
            ((total_logs + 2) as f64).log2() / cfg.maturity_divisor,
            cfg.maturity_floor,
            cfg.maturity_ceiling,
        )
    }

    /// Cumulative-mastery value from the number of eligible logs
    pub fn accumulation_score(&self, eligible_logs: usize) -> f64 {
        clamp(
            eligible_logs as f64 / self.config.target_quality_logs as f64 * 100.0,
            0.0,
            100.0,
        )
    }

    /// All six radar axes in display order
    pub fn radar_metrics(&self, scored: &[ScoredLog<'_>]) -> Vec<RadarMetric> {
        if scored.is_empty() {
            return default_radar();
        }

        let maturity = self.maturity_factor(scored.len());
        let window = self.window(scored);

        let mut metrics: Vec<RadarMetric> = RadarAxis::DECAYED
            .into_iter()
            .map(|axis| {
                let value = self.weighted_average(&window, |score| score.dimension(axis)) * maturity;
                RadarMetric::new(axis, round_metric(value))
            })
            .collect();

        let eligible = scored
            .iter()
            .filter(|item| item.score.accumulation_eligible)
            .count();
        metrics.push(RadarMetric::new(
            RadarAxis::Accumulation,
            round_metric(self.accumulation_score(eligible)),
        ));
        metrics
    }
}

fn round_metric(value: f64) -> u32 {
    clamp(value, 0.0, 100.0).round() as u32
}

/// Radar with every axis at 0
pub fn default_radar() -> Vec<RadarMetric> {
    RadarAxis::ALL
        .into_iter()
        .map(|axis| RadarMetric::new(axis, 0))
        .collect()
}

/// Aggregate one dimension with the default window and decay
pub fn aggregate_dimension<F>(scored: &[ScoredLog<'_>], accessor: F) -> f64
where
    F: Fn(&LogScore) -> f64,
{
    Aggregator::default().aggregate_dimension(scored, accessor)
}

/// Maturity factor with the default curve
pub fn maturity_factor(total_logs: usize) -> f64 {
    Aggregator::default().maturity_factor(total_logs)
}

/// Score `logs` and compute the six radar axes with default settings
pub fn calculate_radar_metrics(logs: &[CalibrationLog]) -> Vec<RadarMetric> {
    if logs.is_empty() {
        return default_radar();
    }
    let scored = LogScorer::default().score_all(logs);
    Aggregator::default().radar_metrics(&scored)
}
