//! Q-value sources: caller-supplied, synthetic, or learned.
//!
//! Synthetic Q-values stand in when no learned values exist. They are
//! derived from a hash of the key so the same category always gets the same
//! value for a given seed.

use crate::model::{MAX_SCORE, QValueMap, ScoreMap, WeightMap, clamp_score};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Default learning rate.
pub const DEFAULT_ALPHA: f64 = 0.1;
/// Default discount factor.
pub const DEFAULT_GAMMA: f64 = 0.9;
/// Default number of update sweeps.
pub const DEFAULT_ITERATIONS: u32 = 10;
/// Default seed for synthetic Q-values.
pub const DEFAULT_SYNTHETIC_SEED: u64 = 42;

const SYNTHETIC_MIN: f64 = 0.1;
const SYNTHETIC_SPAN: f64 = 0.8;

/// Where a Q-value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QValueSource {
    /// Supplied by the caller
    Supplied,
    /// Derived from the key hash
    Synthetic,
    /// Produced by [`QValueLearner`]
    Learned,
}

/// Deterministic synthetic Q-value in `[0.1, 0.9)` for a key.
#[must_use]
pub fn synthetic_q_value(key: &str, seed: u64) -> f64 {
    let hash = xxh3_64_with_seed(key.as_bytes(), seed);
    // Top 53 bits give a uniformly spaced value in [0, 1).
    let unit = (hash >> 11) as f64 / (1_u64 << 53) as f64;
    SYNTHETIC_SPAN.mul_add(unit, SYNTHETIC_MIN)
}

/// Synthetic Q-values for a set of keys.
pub fn synthetic_q_values<I, S>(keys: I, seed: u64) -> QValueMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keys.into_iter()
        .map(|key| {
            let key = key.into();
            let value = synthetic_q_value(&key, seed);
            (key, value)
        })
        .collect()
}

/// Iterative Q-value update driven by user weights and scores.
///
/// Each sweep visits keys in order and applies
/// `q[k] += alpha * (reward[k] + gamma * max(q) - q[k])` in place, where
/// `reward[k]` is the key's share of the user weight times its score as a
/// fraction of 100. Later keys in a sweep see the values already updated
/// earlier in the same sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QValueLearner {
    alpha: f64,
    gamma: f64,
    iterations: u32,
}

impl Default for QValueLearner {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_GAMMA, DEFAULT_ITERATIONS)
    }
}

impl QValueLearner {
    /// Create a learner with explicit parameters.
    #[must_use]
    pub const fn new(alpha: f64, gamma: f64, iterations: u32) -> Self {
        Self {
            alpha,
            gamma,
            iterations,
        }
    }

    /// Learning rate.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Discount factor.
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of sweeps.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Run the update starting from `initial`.
    ///
    /// Keys of `initial` define the output key set; weights and scores for
    /// missing keys count as 0.
    #[must_use]
    pub fn learn(
        &self,
        initial: &QValueMap,
        user_weights: &WeightMap,
        scores: &ScoreMap,
    ) -> QValueMap {
        let weight_total: f64 = user_weights
            .values()
            .filter(|w| w.is_finite() && **w > 0.0)
            .sum();

        let rewards: Vec<f64> = initial
            .keys()
            .map(|key| {
                let weight = user_weights
                    .get(key)
                    .copied()
                    .filter(|w| w.is_finite() && *w > 0.0)
                    .unwrap_or(0.0);
                let share = if weight_total > 0.0 {
                    weight / weight_total
                } else {
                    0.0
                };
                let score = clamp_score(scores.get(key).copied().unwrap_or(0.0)) / MAX_SCORE;
                share * score
            })
            .collect();

        let mut q_values: QValueMap = initial
            .iter()
            .map(|(key, &q)| (key.clone(), if q.is_finite() { q } else { 0.0 }))
            .collect();

        for _ in 0..self.iterations {
            for (index, reward) in rewards.iter().enumerate() {
                let max_q = q_values
                    .values()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                if let Some((_, q)) = q_values.get_index_mut(index) {
                    *q += self.alpha * (reward + self.gamma * max_q - *q);
                }
            }
        }

        tracing::debug!(
            "Learned {} Q-values over {} iterations",
            q_values.len(),
            self.iterations
        );
        q_values
    }
}
