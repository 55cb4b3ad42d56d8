//! File loading stage.

use super::input::{AssessmentInput, records_from_json_str};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Read an assessment from a JSON or YAML file.
pub fn load_assessment_with_context(path: &Path, quiet: bool) -> Result<AssessmentInput> {
    if !quiet {
        tracing::info!("Reading assessment: {}", path.display());
    }

    let input = AssessmentInput::from_path(path)
        .with_context(|| format!("Failed to load assessment: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Loaded {} categories, {} subcategories",
            input.categories.len(),
            input.subcategory_count()
        );
    }
    Ok(input)
}

/// Read assessment record payloads from a JSON file.
pub fn load_records_with_context(path: &Path, quiet: bool) -> Result<Vec<Value>> {
    if !quiet {
        tracing::info!("Reading assessment records: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let records = records_from_json_str(&content)
        .with_context(|| format!("Failed to parse records: {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} records", records.len());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_yaml_and_json() {
        let tmp = tempfile::tempdir().unwrap();
        let yaml = tmp.path().join("input.yml");
        std::fs::write(&yaml, "categories:\n  A:\n    score: 50\n").unwrap();
        let json = tmp.path().join("input.json");
        std::fs::write(&json, r#"{"categories": {"A": {"score": 50}}}"#).unwrap();

        let from_yaml = load_assessment_with_context(&yaml, true).unwrap();
        let from_json = load_assessment_with_context(&json, true).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_records_with_context(Path::new("/nonexistent/records.json"), true)
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/records.json"));
    }
}
