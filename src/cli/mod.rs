//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod config;
mod dedup;
mod score;

pub use config::{run_config_init, run_config_path, run_config_schema, run_config_show};
pub use dedup::run_dedup;
pub use score::{ScoreConfig, run_score};
