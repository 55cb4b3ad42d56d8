//! Output handling for engine reports.
//!
//! Provides report formatting and writing to stdout or a file.

use super::report::ReadinessReport;
use crate::assessment::{AssessmentRecord, AssessmentSummary};
use anyhow::{Context, Result};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Output format for command results
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-readable JSON
    #[default]
    Json,
    /// Human-readable text summary
    Summary,
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Render a readiness report as a text summary.
#[must_use]
pub fn format_report_summary(report: &ReadinessReport, top_gaps: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Readiness Report");
    let _ = writeln!(out, "===================");
    if let Some(kind) = &report.assessment_type {
        let _ = writeln!(out, "Assessment:    {kind}");
    }
    let _ = writeln!(out, "Overall score: {:.1}/100", report.overall_score);
    let _ = writeln!(
        out,
        "Level:         {} ({})",
        report.level,
        report.level.description()
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:<28} {:>7} {:>8} {:>8} {:>8} {:>8}",
        "Category", "Score", "User%", "Soft%", "Adj%", "Contrib"
    );
    for category in &report.categories {
        let r = &category.record;
        let _ = writeln!(
            out,
            "{:<28} {:>7.1} {:>8.1} {:>8.1} {:>8.1} {:>8.2}",
            r.key(),
            r.score(),
            r.user_weight(),
            r.softmax_weight(),
            r.adjusted_weight(),
            r.score_contribution()
        );
        for sub in &category.subcategories {
            let _ = writeln!(
                out,
                "  {:<26} {:>7.1} {:>8.1} {:>8.1} {:>8.1} {:>8.2}",
                sub.key(),
                sub.score(),
                sub.user_weight(),
                sub.softmax_weight(),
                sub.adjusted_weight(),
                sub.score_contribution()
            );
        }
    }

    let gaps = report.top_gaps(top_gaps);
    if !gaps.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top improvement areas:");
        for (rank, gap) in gaps.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<24} gap {:>5.1}  impact {:>5.2}  [{}]",
                rank + 1,
                gap.category,
                gap.gap,
                gap.impact,
                gap.priority
            );
        }
    }

    if report.has_warnings() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    out
}

/// Render canonical records and their summary as text.
#[must_use]
pub fn format_records_summary(records: &[AssessmentRecord], summary: &AssessmentSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} canonical assessments ({} completed, {} in progress, {} not started, {} unknown)",
        summary.total, summary.completed, summary.in_progress, summary.not_started, summary.unknown
    );
    let _ = writeln!(out, "Completion rate: {:.1}%", summary.completion_rate());
    if let Some(average) = summary.average_completed_score {
        let _ = writeln!(out, "Average completed score: {average:.1}");
    }
    if let Some(latest) = summary.latest_completion {
        let _ = writeln!(out, "Latest completion: {}", latest.to_rfc3339());
    }
    let _ = writeln!(out);
    for record in records {
        let score = record
            .score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
        let completed = record
            .completed_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:>6} {:>11}  {}",
            record.assessment_type, record.status, score, completed, record.id
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::AssessmentStatus;

    #[test]
    fn test_output_target_from_option_none() {
        let target = OutputTarget::from_option(None);
        assert!(matches!(target, OutputTarget::Stdout));
    }

    #[test]
    fn test_output_target_from_option_some() {
        let path = PathBuf::from("/tmp/report.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.txt");
        write_output("hello", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_records_summary_lists_records() {
        let records = vec![
            AssessmentRecord::new("r1", "governance", AssessmentStatus::Completed).with_score(81.0),
            AssessmentRecord::new("r2", "data", AssessmentStatus::InProgress),
        ];
        let summary = AssessmentSummary::from_records(&records);
        let text = format_records_summary(&records, &summary);
        assert!(text.contains("2 canonical assessments (1 completed"));
        assert!(text.contains("governance"));
        assert!(text.contains("81.0"));
        assert!(text.contains("in-progress"));
        assert!(text.contains("Completion rate: 50.0%"));
    }
}
