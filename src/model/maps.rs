//! Keyed numeric maps and their numeric contracts.

use indexmap::IndexMap;

/// Category/subcategory name → importance percentage.
///
/// Every `WeightMap` returned by the engine sums to [`WEIGHT_TOTAL`] within
/// [`WEIGHT_SUM_TOLERANCE`] and contains no negative entry.
pub type WeightMap = IndexMap<String, f64>;

/// Category/subcategory name → learned importance signal (typically 0-1).
pub type QValueMap = IndexMap<String, f64>;

/// Category/subcategory name → performance score in `[0, MAX_SCORE]`.
pub type ScoreMap = IndexMap<String, f64>;

/// Total every normalized weight map sums to.
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Allowed drift of a normalized weight map from [`WEIGHT_TOTAL`].
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// Upper bound of every score, contribution and composite.
pub const MAX_SCORE: f64 = 100.0;

/// Sum of all values in a map.
#[must_use]
pub fn total(map: &IndexMap<String, f64>) -> f64 {
    map.values().sum()
}

/// Whether a weight map satisfies the normalized-sum contract.
#[must_use]
pub fn sums_to_total(weights: &WeightMap) -> bool {
    (total(weights) - WEIGHT_TOTAL).abs() <= WEIGHT_SUM_TOLERANCE
}

/// Bound a score into `[0, MAX_SCORE]`; non-finite scores become 0.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}
