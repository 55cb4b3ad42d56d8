//! Engine output types.

use crate::model::WeightMap;
use crate::scoring::{GapAnalysisEntry, ReadinessLevel, top_gaps};
use crate::weights::QValueSource;
use serde::Serialize;

/// Scores and weights of one weighted key, as derived by the engine.
///
/// Only the engine builds these; the softmax weight, adjusted weight and
/// contribution are recomputed on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryRecord {
    pub(crate) key: String,
    pub(crate) score: f64,
    pub(crate) user_weight: f64,
    pub(crate) q_value: f64,
    pub(crate) q_value_source: QValueSource,
    pub(crate) softmax_weight: f64,
    pub(crate) adjusted_weight: f64,
    pub(crate) score_contribution: f64,
}

impl SubcategoryRecord {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Score in `[0, 100]`
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Normalized user weight
    #[must_use]
    pub const fn user_weight(&self) -> f64 {
        self.user_weight
    }

    #[must_use]
    pub const fn q_value(&self) -> f64 {
        self.q_value
    }

    #[must_use]
    pub const fn q_value_source(&self) -> QValueSource {
        self.q_value_source
    }

    #[must_use]
    pub const fn softmax_weight(&self) -> f64 {
        self.softmax_weight
    }

    /// Blended weight used for scoring
    #[must_use]
    pub const fn adjusted_weight(&self) -> f64 {
        self.adjusted_weight
    }

    /// `score * adjusted_weight / 100`
    #[must_use]
    pub const fn score_contribution(&self) -> f64 {
        self.score_contribution
    }
}

/// A category with its category-level record and its subcategories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    #[serde(flatten)]
    pub record: SubcategoryRecord,
    /// Empty when the category was scored directly
    pub subcategories: Vec<SubcategoryRecord>,
}

impl CategoryReport {
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.key()
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.record.score()
    }

    /// Subcategory by name
    #[must_use]
    pub fn subcategory(&self, key: &str) -> Option<&SubcategoryRecord> {
        self.subcategories.iter().find(|s| s.key() == key)
    }
}

/// Full result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub engine_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    /// Composite score in `[0, 100]`
    pub overall_score: f64,
    pub level: ReadinessLevel,
    pub categories: Vec<CategoryReport>,
    /// Gaps by category, highest impact first
    pub gaps: Vec<GapAnalysisEntry>,
    /// Non-fatal issues met while scoring
    pub warnings: Vec<String>,
}

impl ReadinessReport {
    /// Category by name
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Adjusted category weights.
    #[must_use]
    pub fn category_weights(&self) -> WeightMap {
        self.categories
            .iter()
            .map(|c| (c.name().to_string(), c.record.adjusted_weight()))
            .collect()
    }

    /// The `limit` highest-impact gaps.
    #[must_use]
    pub fn top_gaps(&self, limit: usize) -> &[GapAnalysisEntry] {
        top_gaps(&self.gaps, limit)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
