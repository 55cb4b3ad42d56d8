//! Gap analysis and improvement prioritization.

use crate::model::{MAX_SCORE, ScoreMap, WeightMap, clamp_score};
use serde::Serialize;
use std::cmp::Ordering;

/// Impact above which a gap is high priority.
pub const HIGH_IMPACT_THRESHOLD: f64 = 15.0;
/// Impact above which a gap is medium priority.
pub const MEDIUM_IMPACT_THRESHOLD: f64 = 7.0;

/// Improvement priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Tier for an impact value. Both thresholds are strict.
    #[must_use]
    pub fn from_impact(impact: f64) -> Self {
        if impact > HIGH_IMPACT_THRESHOLD {
            Self::High
        } else if impact > MEDIUM_IMPACT_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One category's shortfall and its weighted impact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysisEntry {
    pub category: String,
    pub score: f64,
    pub weight: f64,
    /// `100 - score`
    pub gap: f64,
    /// `gap * weight / 100`
    pub impact: f64,
    pub priority: Priority,
}

impl GapAnalysisEntry {
    fn new(category: &str, score: f64, weight: f64) -> Self {
        let score = clamp_score(score);
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        let gap = MAX_SCORE - score;
        let impact = gap * weight / MAX_SCORE;
        Self {
            category: category.to_string(),
            score,
            weight,
            gap,
            impact,
            priority: Priority::from_impact(impact),
        }
    }
}

/// Compute gaps for every scored category, highest impact first.
///
/// Ties on impact fall back to the larger gap, then the category name.
/// Categories without a weight get weight 0.
#[must_use]
pub fn analyze_gaps(scores: &ScoreMap, weights: &WeightMap) -> Vec<GapAnalysisEntry> {
    let mut entries: Vec<GapAnalysisEntry> = scores
        .iter()
        .map(|(category, &score)| {
            let weight = weights.get(category).copied().unwrap_or_else(|| {
                tracing::warn!("No weight for '{category}' in gap analysis, using 0");
                0.0
            });
            GapAnalysisEntry::new(category, score, weight)
        })
        .collect();

    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &GapAnalysisEntry, b: &GapAnalysisEntry) -> Ordering {
    b.impact
        .total_cmp(&a.impact)
        .then_with(|| b.gap.total_cmp(&a.gap))
        .then_with(|| a.category.cmp(&b.category))
}

/// The `limit` highest-impact entries.
#[must_use]
pub fn top_gaps(entries: &[GapAnalysisEntry], limit: usize) -> &[GapAnalysisEntry] {
    &entries[..entries.len().min(limit)]
}
