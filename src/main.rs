//! Skillradar - competency scoring for calibrated child observations
//!
//! Command-line front end over the local calibration log store: query the
//! radar, level and AI agreement stats, and move logs in and out.

use clap::{Parser, Subcommand};
use skillradar_core::error::Result;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

mod cli;

use cli::helpers::OutputFormat;

#[derive(Parser)]
#[command(name = "skillradar")]
#[command(about = "Competency radar, levels and AI agreement for calibrated observations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Log file path (overrides SKILLRADAR_LOGS env var and default)
    #[arg(long, global = true)]
    logs: Option<String>,

    /// Scoring config path (overrides SKILLRADAR_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, radar, totals, streak and feedback
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show AI/human agreement trend and domain mastery
    Evolution {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show per-log dimension scores and XP, most recent first
    Score {
        /// Maximum number of logs to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Import calibration logs from a JSON file
    Import {
        /// JSON array of logs, or an object with a "logs" array
        input: PathBuf,
    },

    /// Export all calibration logs as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete every stored calibration log
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("skillradar={},skillradar_core={}", level, level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries command output
        .init();

    debug!("Skillradar v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Stats { format } => cli::stats::handle(format, cli.logs, cli.config),
        Commands::Evolution { format } => cli::evolution::handle(format, cli.logs, cli.config),
        Commands::Score { limit, format } => {
            cli::score::handle(limit, format, cli.logs, cli.config)
        }
        Commands::Import { input } => cli::import::handle(input, cli.logs),
        Commands::Export { output } => cli::export::handle(output, cli.logs),
        Commands::Clear { yes } => cli::clear::handle(yes, cli.logs),
    }
}
