//! Weighted score aggregation.
//!
//! A key's contribution is `score * weight / 100` and a composite is the sum
//! of contributions, so a composite is a weight-adjusted score rather than a
//! plain average. The same math applies at every level of the hierarchy.

use crate::model::{MAX_SCORE, ScoreMap, WeightMap, clamp_score};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Which side of a score/weight pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeySetIssue {
    /// Key has a score but no weight
    MissingWeight,
    /// Key has a weight but no score
    MissingScore,
}

/// Non-fatal warning raised when scores and weights disagree on their keys.
///
/// The offending key contributes 0 and computation carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySetWarning {
    pub key: String,
    pub issue: KeySetIssue,
}

impl fmt::Display for KeySetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issue {
            KeySetIssue::MissingWeight => {
                write!(f, "'{}' has a score but no weight, contributing 0", self.key)
            }
            KeySetIssue::MissingScore => {
                write!(f, "'{}' has a weight but no score, contributing 0", self.key)
            }
        }
    }
}

/// Result of aggregating one level of scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Per-key contribution to the composite
    pub contributions: ScoreMap,
    /// Sum of contributions, within `[0, 100]`
    pub overall: f64,
    /// Key-set mismatches found along the way
    pub warnings: Vec<KeySetWarning>,
}

impl Aggregation {
    /// Whether scores and weights covered the same keys.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Aggregate scores with adjusted weights.
///
/// Contributions cover every key of `scores` followed by weight-only keys.
/// Scores outside `[0, 100]` are clamped before use.
#[must_use]
pub fn aggregate(scores: &ScoreMap, adjusted_weights: &WeightMap) -> Aggregation {
    let mut contributions = ScoreMap::with_capacity(scores.len().max(adjusted_weights.len()));
    let mut warnings = Vec::new();

    for (key, &raw_score) in scores {
        let score = clamp_score(raw_score);
        if score != raw_score {
            tracing::warn!("Score for '{key}' is {raw_score}, clamped to {score}");
        }

        let contribution = match adjusted_weights.get(key) {
            Some(&weight) => contribution(score, weight),
            None => {
                warnings.push(KeySetWarning {
                    key: key.clone(),
                    issue: KeySetIssue::MissingWeight,
                });
                0.0
            }
        };
        contributions.insert(key.clone(), contribution);
    }

    for key in adjusted_weights.keys() {
        if !scores.contains_key(key) {
            warnings.push(KeySetWarning {
                key: key.clone(),
                issue: KeySetIssue::MissingScore,
            });
            contributions.insert(key.clone(), 0.0);
        }
    }

    for warning in &warnings {
        tracing::warn!("Inconsistent key set: {warning}");
    }

    let overall = clamp_score(contributions.values().sum());
    Aggregation {
        contributions,
        overall,
        warnings,
    }
}

fn contribution(score: f64, weight: f64) -> f64 {
    let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
    clamp_score(score * weight / MAX_SCORE)
}

/// Subcategory scores and weights belonging to one category.
#[derive(Debug, Clone, Default)]
pub struct CategoryScores {
    pub scores: ScoreMap,
    pub weights: WeightMap,
}

/// Two-level aggregation: subcategories into categories, categories into an
/// overall composite.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HierarchicalAggregation {
    /// Per-category subcategory aggregation
    pub categories: IndexMap<String, Aggregation>,
    /// Category-level aggregation over the category composites
    pub overall: Aggregation,
}

impl HierarchicalAggregation {
    /// Composite score of each category.
    #[must_use]
    pub fn category_scores(&self) -> ScoreMap {
        self.categories
            .iter()
            .map(|(key, agg)| (key.clone(), agg.overall))
            .collect()
    }

    /// Overall composite score.
    #[must_use]
    pub const fn overall_score(&self) -> f64 {
        self.overall.overall
    }
}

/// Aggregate subcategories into categories, then categories into one score
/// using `category_weights`.
#[must_use]
pub fn aggregate_hierarchy(
    categories: &IndexMap<String, CategoryScores>,
    category_weights: &WeightMap,
) -> HierarchicalAggregation {
    let categories: IndexMap<String, Aggregation> = categories
        .iter()
        .map(|(key, category)| (key.clone(), aggregate(&category.scores, &category.weights)))
        .collect();
    let category_scores: ScoreMap = categories
        .iter()
        .map(|(key, agg)| (key.clone(), agg.overall))
        .collect();
    let overall = aggregate(&category_scores, category_weights);

    HierarchicalAggregation {
        categories,
        overall,
    }
}
