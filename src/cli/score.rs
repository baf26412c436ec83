//! Per-log score breakdown command

use skillradar_core::error::Result;

use super::helpers::{load_logs_and_engine, OutputFormat};

/// Handle score command
pub fn handle(
    limit: usize,
    format: OutputFormat,
    logs_path: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let (logs, engine) = load_logs_and_engine(logs_path, config_path)?;
    let rows: Vec<_> = engine.breakdown(&logs).into_iter().take(limit).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No calibration logs");
            }
            for row in &rows {
                let s = &row.score;
                println!(
                    "{} {}  composite {:.1}{}  +{} XP",
                    row.timestamp,
                    row.id,
                    s.composite,
                    if s.accumulation_eligible { " ★" } else { "" },
                    row.xp
                );
                println!(
                    "    evidence {:.0}  breadth {:.0} ({} domains)  depth {:.0}  appropriateness {:.0}  reflection {:.0}",
                    s.evidence, s.breadth, s.domain_hits, s.depth, s.appropriateness, s.reflection
                );
            }
        }
    }

    Ok(())
}
