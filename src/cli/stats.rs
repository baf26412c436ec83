//! Competency stats command

use serde::Serialize;
use skillradar_core::{error::Result, get_assessment_feedback, UserStats};
use tracing::debug;

use super::helpers::{bar, load_logs_and_engine, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a UserStats,
    feedback: &'a str,
}

/// Handle stats command
pub fn handle(
    format: OutputFormat,
    logs_path: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let (logs, engine) = load_logs_and_engine(logs_path, config_path)?;
    debug!("Computing stats over {} logs", logs.len());

    let stats = engine.user_stats(&logs);
    let feedback = get_assessment_feedback(&stats.radar_data);

    match format {
        OutputFormat::Json => {
            let report = StatsReport {
                stats: &stats,
                feedback: &feedback,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let level = &stats.level;
            println!("Lv{} {}", level.current_level, level.current_title);
            println!(
                "  XP {} / {}  {} {:.0}%",
                level.current_xp,
                level.next_level_xp,
                bar(level.progress_percent, 20),
                level.progress_percent
            );
            println!();
            for metric in &stats.radar_data {
                println!(
                    "  {:<8} {} {:>3}",
                    metric.label,
                    bar(metric.value as f64, 20),
                    metric.value
                );
            }
            println!();
            println!(
                "  Observations: {}  Calibrated: {}  Streak: {} day(s)",
                stats.total_observations, stats.total_calibrations, stats.streak_days
            );
            println!();
            println!("{}", feedback);
        }
    }

    Ok(())
}
