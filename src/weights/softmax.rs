//! Softmax transformation of Q-values into percentage weights.

use crate::model::{QValueMap, WEIGHT_TOTAL, WeightMap};

/// Default softmax scaling factor.
pub const DEFAULT_SOFTMAX_ETA: f64 = 1.0;

/// Converts Q-values into a softmax distribution expressed in percent.
///
/// The maximum Q-value is subtracted before exponentiating, so large
/// Q-values cannot overflow. Outputs are one-decimal percentages that sum
/// to exactly 100: entries are floored to a tenth and the remaining tenths
/// go to the entries with the largest remainders. That rounding never
/// reorders entries, so the key with the highest Q-value always keeps the
/// highest weight.
#[derive(Debug, Clone, Copy)]
pub struct SoftmaxTransformer {
    eta: f64,
}

impl Default for SoftmaxTransformer {
    fn default() -> Self {
        Self {
            eta: DEFAULT_SOFTMAX_ETA,
        }
    }
}

impl SoftmaxTransformer {
    /// Create a transformer with the default scaling factor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scaling factor applied to Q-value differences.
    ///
    /// Larger values sharpen the distribution, 0 flattens it to uniform.
    /// Negative or non-finite values fall back to the default.
    #[must_use]
    pub fn with_eta(mut self, eta: f64) -> Self {
        if eta.is_finite() && eta >= 0.0 {
            self.eta = eta;
        } else {
            tracing::warn!("Invalid softmax eta {eta}, using {DEFAULT_SOFTMAX_ETA}");
            self.eta = DEFAULT_SOFTMAX_ETA;
        }
        self
    }

    /// The scaling factor in use.
    #[must_use]
    pub const fn eta(&self) -> f64 {
        self.eta
    }

    /// Transform Q-values into percentage weights.
    ///
    /// An empty map yields an empty map. Non-finite Q-values count as 0.
    #[must_use]
    pub fn transform(&self, q_values: &QValueMap) -> WeightMap {
        if q_values.is_empty() {
            return WeightMap::new();
        }

        let values: Vec<f64> = q_values
            .iter()
            .map(|(key, &q)| {
                if q.is_finite() {
                    q
                } else {
                    tracing::warn!("Q-value for '{key}' is {q}, treating as 0");
                    0.0
                }
            })
            .collect();
        let max_q = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let exps: Vec<f64> = if self.eta == 0.0 {
            vec![1.0; values.len()]
        } else {
            values
                .iter()
                .map(|q| {
                    // q - max_q can overflow to -inf for extreme finite inputs
                    let exponent = self.eta * (q - max_q);
                    if exponent.is_nan() { 0.0 } else { exponent.exp() }
                })
                .collect()
        };
        // The max entry contributes exp(0) = 1, so the sum is never zero.
        let sum_exp: f64 = exps.iter().sum();
        let shares: Vec<f64> = exps.iter().map(|e| e / sum_exp * WEIGHT_TOTAL).collect();

        q_values
            .keys()
            .cloned()
            .zip(round_to_tenths(&shares))
            .collect()
    }
}

/// Largest-remainder rounding of percentages to one decimal.
fn round_to_tenths(shares: &[f64]) -> Vec<f64> {
    let total_tenths = (WEIGHT_TOTAL * 10.0).round() as i64;
    let scaled: Vec<f64> = shares.iter().map(|s| s * 10.0).collect();
    let mut tenths: Vec<i64> = scaled.iter().map(|s| s.floor() as i64).collect();
    let assigned: i64 = tenths.iter().sum();

    let mut order: Vec<usize> = (0..scaled.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = scaled[a] - scaled[a].floor();
        let rem_b = scaled[b] - scaled[b].floor();
        rem_b
            .total_cmp(&rem_a)
            .then_with(|| scaled[b].total_cmp(&scaled[a]))
            .then_with(|| a.cmp(&b))
    });

    let remaining = usize::try_from(total_tenths - assigned).unwrap_or(0);
    for &index in order.iter().take(remaining) {
        tenths[index] += 1;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

/// Softmax with the default scaling factor.
#[must_use]
pub fn softmax(q_values: &QValueMap) -> WeightMap {
    SoftmaxTransformer::default().transform(q_values)
}
