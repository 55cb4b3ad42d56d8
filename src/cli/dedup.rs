//! Dedup command handler.
//!
//! Implements the `dedup` subcommand: reduces assessment records to one
//! canonical record per assessment type.

use crate::assessment::{AssessmentSummary, deduplicate_values};
use crate::pipeline::{
    OutputFormat, OutputTarget, exit_codes, format_records_summary, load_records_with_context,
    write_output,
};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Run the dedup command, returning the desired exit code.
pub fn run_dedup(
    records_path: PathBuf,
    output: OutputFormat,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let values = load_records_with_context(&records_path, quiet)?;
    let records = deduplicate_values(&values)?;
    let summary = AssessmentSummary::from_records(&records);

    let output_text = match output {
        OutputFormat::Json => {
            let document = json!({
                "tool": "readiness-engine",
                "version": env!("CARGO_PKG_VERSION"),
                "inputRecords": values.len(),
                "summary": summary,
                "records": records,
            });
            serde_json::to_string_pretty(&document).unwrap_or_default()
        }
        OutputFormat::Summary => format_records_summary(&records, &summary),
    };

    write_output(&output_text, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}
