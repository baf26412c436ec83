//! AI evolution command

use skillradar_core::error::Result;
use tracing::debug;

use super::helpers::{bar, load_logs_and_engine, OutputFormat};

/// Handle evolution command
pub fn handle(
    format: OutputFormat,
    logs_path: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let (logs, engine) = load_logs_and_engine(logs_path, config_path)?;
    debug!("Computing AI evolution over {} logs", logs.len());

    let stats = engine.ai_evolution(&logs);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!(
                "Average sync: {}%  Active context: {}",
                stats.average_sync_score, stats.active_context_count
            );
            if stats.mind_sync_trend.is_empty() {
                println!("  No calibrations yet");
            }
            for point in &stats.mind_sync_trend {
                println!(
                    "  #{:<2} {} {:>3}%  {}",
                    point.index + 1,
                    bar(point.score as f64, 20),
                    point.score,
                    point.timestamp
                );
            }
            if !stats.domain_mastery.is_empty() {
                println!();
                println!("Domain mastery:");
                for domain in &stats.domain_mastery {
                    println!(
                        "  {:<6} {} {:>3} ({} logs)",
                        domain.domain,
                        bar(domain.level as f64, 20),
                        domain.level,
                        domain.count
                    );
                }
            }
        }
    }

    Ok(())
}
