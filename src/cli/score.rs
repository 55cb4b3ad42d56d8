//! Score command handler.
//!
//! Implements the `score` subcommand: runs the engine over an assessment
//! file and reports composite scores, reconciled weights and gaps.

use crate::config::{ConfigPreset, EngineConfig, load_or_default};
use crate::pipeline::{
    OutputFormat, OutputTarget, ReadinessEngine, ReadinessReport, exit_codes,
    format_report_summary, load_assessment_with_context, write_output,
};
use crate::weights::BlendStrategy;
use anyhow::{Result, bail};
use serde_json::json;
use std::path::PathBuf;

/// Score command configuration
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub input_path: PathBuf,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub preset: Option<String>,
    pub blend_factor: Option<f64>,
    pub strategy: Option<BlendStrategy>,
    pub learn: bool,
    pub min_score: Option<f64>,
    pub quiet: bool,
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(config: ScoreConfig) -> Result<i32> {
    let engine_config = resolve_engine_config(&config)?;
    let engine = ReadinessEngine::try_new(&engine_config)?;
    let input = load_assessment_with_context(&config.input_path, config.quiet)?;

    let report = engine.assess(&input)?;

    let output_text = match config.output {
        OutputFormat::Json => format_score_json(&report, &config),
        OutputFormat::Summary => format_report_summary(&report, engine_config.report.top_gaps),
    };

    let output_target = OutputTarget::from_option(config.output_file.clone());
    write_output(&output_text, &output_target, config.quiet)?;

    if let Some(threshold) = config.min_score
        && report.overall_score < threshold
    {
        tracing::error!(
            "Readiness score {:.1} is below minimum threshold {:.1}",
            report.overall_score,
            threshold
        );
        return Ok(exit_codes::BELOW_THRESHOLD);
    }

    Ok(exit_codes::SUCCESS)
}

/// Build the engine configuration: preset or config file, then CLI flags.
fn resolve_engine_config(config: &ScoreConfig) -> Result<EngineConfig> {
    let mut engine_config = match &config.preset {
        Some(name) => EngineConfig::from_preset(parse_preset(name)?),
        None => {
            let (file_config, loaded_from) = load_or_default(config.config_path.as_deref());
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            file_config
        }
    };

    if let Some(blend_factor) = config.blend_factor {
        engine_config.blending.blend_factor = blend_factor;
    }
    if let Some(strategy) = config.strategy {
        engine_config.blending.strategy = strategy;
    }
    if config.learn {
        engine_config.learning.enabled = true;
    }
    Ok(engine_config)
}

/// Parse preset from string
fn parse_preset(name: &str) -> Result<ConfigPreset> {
    ConfigPreset::from_name(name).map_or_else(
        || {
            let valid: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            bail!(
                "Unknown preset: {name}. Valid options: {}",
                valid.join(", ")
            )
        },
        Ok,
    )
}

/// Format the report as JSON
fn format_score_json(report: &ReadinessReport, config: &ScoreConfig) -> String {
    let output = json!({
        "tool": "readiness-engine",
        "version": env!("CARGO_PKG_VERSION"),
        "input": config.input_path.file_name().unwrap_or_default().to_string_lossy(),
        "report": report,
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}
