//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod clear;
pub mod evolution;
pub mod export;
pub mod helpers;
pub mod import;
pub mod score;
pub mod stats;
