//! readiness-engine: AI-readiness weight reconciliation and scoring
//!
//! Blends user-declared category weights with learned importance signals,
//! scores assessments, and ranks improvement gaps.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use readiness_engine::{
    cli::{self, ScoreConfig},
    pipeline::{OutputFormat, exit_codes},
    weights::BlendStrategy,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with engine details
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  Assessments: JSON, YAML",
        "\n  Records:     JSON (array or {records: [...]})",
        "\n\nOutput Formats:",
        "\n  json, summary",
        "\n\nPresets:",
        "\n  default, user-led, constrained, learned"
    )
}

#[derive(Parser)]
#[command(name = "readiness-engine")]
#[command(version, long_version = build_long_version())]
#[command(about = "AI-readiness weight reconciliation and scoring engine", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Overall score below --min-score
    3  Error occurred

EXAMPLES:
    # Score an assessment and print a summary table
    readiness-engine score assessment.json -o summary

    # Keep weights close to what the user declared
    readiness-engine score assessment.yaml --strategy clamped

    # CI gate on a minimum readiness score
    readiness-engine score assessment.json --min-score 60

    # Collapse assessment history to one record per type
    readiness-engine dedup records.json -o summary")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Path to the assessment input (JSON or YAML)
    input: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Named configuration preset (ignores the config file)
    #[arg(long)]
    preset: Option<String>,

    /// Blend factor between user weights (0.0) and softmax weights (1.0)
    #[arg(long)]
    blend_factor: Option<f64>,

    /// Blending strategy
    #[arg(long, value_enum)]
    strategy: Option<BlendStrategy>,

    /// Refine category Q-values with the Q-learning pass before blending
    #[arg(long)]
    learn: bool,

    /// Exit with code 1 if the overall score is below this value
    #[arg(long)]
    min_score: Option<f64>,
}

/// Arguments for the `dedup` subcommand
#[derive(Parser)]
struct DedupArgs {
    /// Path to the assessment records (JSON)
    records: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an assessment and reconcile its weights
    Score(ScoreArgs),

    /// Deduplicate assessment records to one canonical record per type
    Dedup(DedupArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an example .readiness-engine.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let exit_code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Run the selected command and return its exit code.
fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Score(args) => cli::run_score(ScoreConfig {
            input_path: args.input,
            output: args.output,
            output_file: args.output_file,
            config_path: cli.config,
            preset: args.preset,
            blend_factor: args.blend_factor,
            strategy: args.strategy,
            learn: args.learn,
            min_score: args.min_score,
            quiet: cli.quiet,
        }),

        Commands::Dedup(args) => {
            cli::run_dedup(args.records, args.output, args.output_file, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "readiness-engine", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(cli.config.as_deref()),
            ConfigAction::Path => cli::run_config_path(cli.config.as_deref()),
            ConfigAction::Schema { output } => cli::run_config_schema(output),
            ConfigAction::Init => {
                let cwd = std::env::current_dir().context("cannot determine current directory")?;
                cli::run_config_init(&cwd)
            }
        },
    }
}
