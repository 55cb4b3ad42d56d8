//! Engine input: categories with their scores, answers, weights and Q-values.
//!
//! ```json
//! {
//!   "assessmentType": "enterprise",
//!   "categories": {
//!     "Data": {
//!       "weight": 40,
//!       "qValue": 0.8,
//!       "subcategories": {
//!         "Quality": { "answers": [3, 4, 3], "weight": 60 },
//!         "Access": { "score": 55, "weight": 40 }
//!       }
//!     },
//!     "Talent": { "weight": 60, "score": 42 }
//!   }
//! }
//! ```

use crate::error::{ErrorContext, InputErrorKind, ReadinessError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A full assessment submitted to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    /// Assessment type label carried through to the report
    #[serde(default, alias = "assessment_type", alias = "type")]
    pub assessment_type: Option<String>,
    /// Categories in display order
    #[serde(default)]
    pub categories: IndexMap<String, CategoryInput>,
}

/// One category of an assessment.
///
/// A category with subcategories derives its score from them; otherwise its
/// own `score` (or `answers`) is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryInput {
    /// Explicit 0-100 score; takes precedence over `answers`
    pub score: Option<f64>,
    /// Raw questionnaire answers
    pub answers: Vec<f64>,
    /// User-assigned importance
    #[serde(alias = "user_weight", alias = "userWeight")]
    pub weight: Option<f64>,
    /// Learned importance signal
    #[serde(alias = "q_value")]
    pub q_value: Option<f64>,
    pub subcategories: IndexMap<String, SubcategoryInput>,
}

/// One subcategory of a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubcategoryInput {
    pub score: Option<f64>,
    pub answers: Vec<f64>,
    #[serde(alias = "user_weight", alias = "userWeight")]
    pub weight: Option<f64>,
    #[serde(alias = "q_value")]
    pub q_value: Option<f64>,
}

impl AssessmentInput {
    /// Decode an assessment from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("assessment input")
    }

    /// Decode an assessment from YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("assessment input")
    }

    /// Read an assessment from a file; `.yaml`/`.yml` files are decoded as
    /// YAML, everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReadinessError::io(path, e))?;
        if is_yaml(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Number of subcategories across all categories.
    #[must_use]
    pub fn subcategory_count(&self) -> usize {
        self.categories.values().map(|c| c.subcategories.len()).sum()
    }
}

/// Whether a path names a YAML document.
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Extract assessment record payloads from a JSON document.
///
/// Accepts a bare array or an object wrapping the array under `records`,
/// `assessments` or `data`.
pub fn records_from_json_str(content: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(content).context("assessment records")?;
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut object) => ["records", "assessments", "data"]
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| {
                ReadinessError::input(
                    "assessment records",
                    InputErrorKind::InvalidJson(
                        "expected an array or an object with a 'records' array".to_string(),
                    ),
                )
            }),
        other => Err(ReadinessError::input(
            "assessment records",
            InputErrorKind::InvalidJson(format!(
                "expected an array of records, got {other}"
            )),
        )),
    }
}
