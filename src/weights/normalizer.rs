//! Weight normalization to an exact total of 100.
//!
//! Values are scaled proportionally and rounded to one decimal. The rounding
//! residual is then written onto a single deterministic entry so that the
//! sum lands on 100 and repeated runs over the same input produce the same
//! output.

use crate::error::{ReadinessError, Result};
use crate::model::{WEIGHT_TOTAL, WeightMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Entry that absorbs the rounding residual after normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ResidualTarget {
    /// First key in iteration order with a positive weight
    #[default]
    FirstKey,
    /// Last key in iteration order with a positive weight
    LastKey,
    /// Largest weight (first one on ties)
    Largest,
}

impl ResidualTarget {
    /// Name used in configuration files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstKey => "first-key",
            Self::LastKey => "last-key",
            Self::Largest => "largest",
        }
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalizes weight maps so they sum to exactly 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightNormalizer {
    residual_target: ResidualTarget,
}

impl WeightNormalizer {
    /// Create a normalizer with the given residual target.
    #[must_use]
    pub const fn new(residual_target: ResidualTarget) -> Self {
        Self { residual_target }
    }

    /// The residual target in use.
    #[must_use]
    pub const fn residual_target(&self) -> ResidualTarget {
        self.residual_target
    }

    /// Scale `weights` to sum to 100.
    ///
    /// An all-zero map falls back to an even distribution over its keys.
    /// Negative and non-finite values count as zero.
    pub fn normalize(&self, weights: &WeightMap) -> Result<WeightMap> {
        if weights.is_empty() {
            return Err(ReadinessError::empty_weights("normalize"));
        }

        let sanitized: WeightMap = weights
            .iter()
            .map(|(key, &value)| (key.clone(), sanitize_weight(key, value)))
            .collect();
        let sum: f64 = sanitized.values().sum();

        if sum <= 0.0 {
            tracing::debug!(
                "All {} weights are zero, distributing evenly",
                sanitized.len()
            );
            return Ok(self.distribute_even(sanitized.into_keys()));
        }

        // Divide before scaling: 100 / sum overflows for subnormal sums.
        let (sanitized, sum) = if sum.is_finite() {
            (sanitized, sum)
        } else {
            rescale_to_unit_max(sanitized)
        };
        let mut result: WeightMap = sanitized
            .into_iter()
            .map(|(key, value)| (key, round_one_decimal(value / sum * WEIGHT_TOTAL)))
            .collect();
        self.correct_residual(&mut result);
        Ok(result)
    }

    /// Like [`normalize`](Self::normalize), but an empty map is distributed
    /// evenly over `fallback_keys` instead of failing.
    pub fn normalize_with_fallback<S: AsRef<str>>(
        &self,
        weights: &WeightMap,
        fallback_keys: &[S],
    ) -> Result<WeightMap> {
        if !weights.is_empty() {
            return self.normalize(weights);
        }
        if fallback_keys.is_empty() {
            return Err(ReadinessError::empty_weights(
                "normalize: no weights and no fallback keys",
            ));
        }
        Ok(self.distribute_even(fallback_keys.iter().map(|k| k.as_ref().to_string())))
    }

    /// Give every key an equal share of 100.
    ///
    /// Duplicate keys collapse into one entry. An empty key set yields an
    /// empty map.
    pub fn distribute_even<I, S>(&self, keys: I) -> WeightMap
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut result: WeightMap = keys.into_iter().map(|k| (k.into(), 0.0)).collect();
        if result.is_empty() {
            return result;
        }

        let share = round_one_decimal(WEIGHT_TOTAL / result.len() as f64);
        for value in result.values_mut() {
            *value = share;
        }
        self.correct_residual(&mut result);
        result
    }

    /// Write the rounding residual onto the residual target.
    ///
    /// A negative residual larger than the target entry is taken from the
    /// largest entries in turn, so no entry goes below zero.
    fn correct_residual(&self, weights: &mut WeightMap) {
        let mut residual = round_one_decimal(WEIGHT_TOTAL - weights.values().sum::<f64>());
        if residual == 0.0 {
            return;
        }

        if let Some(index) = self.residual_index(weights, residual) {
            residual = apply_residual(weights, index, residual);
        }
        while residual < 0.0 {
            let Some(index) = largest_index(weights) else {
                break;
            };
            let remaining = apply_residual(weights, index, residual);
            if remaining == residual {
                break;
            }
            residual = remaining;
        }
    }

    fn residual_index(&self, weights: &WeightMap, residual: f64) -> Option<usize> {
        let preferred = match self.residual_target {
            ResidualTarget::FirstKey => weights.values().position(|&v| v > 0.0),
            ResidualTarget::LastKey => weights.values().rposition(|&v| v > 0.0),
            ResidualTarget::Largest => largest_index(weights),
        };

        // Prefer an entry that can take the whole residual without going negative.
        match preferred {
            Some(index)
                if weights
                    .get_index(index)
                    .is_some_and(|(_, &v)| v + residual >= 0.0) =>
            {
                Some(index)
            }
            _ => largest_index(weights),
        }
    }
}

/// Add as much of `residual` to one entry as it can take; returns the rest.
fn apply_residual(weights: &mut WeightMap, index: usize, residual: f64) -> f64 {
    let Some((key, value)) = weights.get_index_mut(index) else {
        return residual;
    };
    let applied = residual.max(-*value);
    tracing::debug!("Applying rounding residual {applied:+.1} to '{key}'");
    *value = round_one_decimal(*value + applied);
    round_one_decimal(residual - applied)
}

/// Index of the largest weight, first one on ties.
fn largest_index(weights: &WeightMap) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in weights.values().enumerate() {
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Divide every weight by the largest one; used when the raw sum overflows.
fn rescale_to_unit_max(weights: WeightMap) -> (WeightMap, f64) {
    let max = weights.values().copied().fold(0.0, f64::max);
    let rescaled: WeightMap = weights.into_iter().map(|(k, v)| (k, v / max)).collect();
    let sum = rescaled.values().sum();
    (rescaled, sum)
}

fn sanitize_weight(key: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("Weight for '{key}' is {value}, treating as 0");
        0.0
    }
}

/// Normalize with the default (first-key) residual rule.
pub fn normalize(weights: &WeightMap) -> Result<WeightMap> {
    WeightNormalizer::default().normalize(weights)
}

/// Even distribution with the default (first-key) residual rule.
pub fn distribute_even<I, S>(keys: I) -> WeightMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    WeightNormalizer::default().distribute_even(keys)
}
