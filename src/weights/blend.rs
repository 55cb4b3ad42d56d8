//! Blending of user-assigned weights with softmax-derived weights.

use super::normalizer::WeightNormalizer;
use crate::error::{ReadinessError, Result};
use crate::model::WeightMap;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default share of the softmax signal in the adjusted weight.
pub const DEFAULT_BLEND_FACTOR: f64 = 0.3;

/// Default allowed deviation (in percentage points) for clamped blending.
pub const DEFAULT_MAX_DEVIATION: f64 = 2.0;

/// How user and softmax weights are combined.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlendStrategy {
    /// `user * (1 - f) + softmax * f`
    #[default]
    Linear,
    /// Softmax weight clamped to `user ± max_deviation`
    Clamped,
}

impl BlendStrategy {
    /// Name used in configuration files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Clamped => "clamped",
        }
    }
}

/// Combines user weights and softmax weights into adjusted weights.
///
/// A key missing from either input counts as 0 for that input only; the
/// output covers the union of both key sets (user keys first) and is
/// renormalized to sum to 100.
#[derive(Debug, Clone, Copy)]
pub struct WeightBlender {
    blend_factor: f64,
    strategy: BlendStrategy,
    max_deviation: f64,
    normalizer: WeightNormalizer,
}

impl Default for WeightBlender {
    fn default() -> Self {
        Self::new(DEFAULT_BLEND_FACTOR)
    }
}

impl WeightBlender {
    /// Linear blender with the given blend factor, clamped into `[0, 1]`.
    #[must_use]
    pub fn new(blend_factor: f64) -> Self {
        Self {
            blend_factor: sanitize_blend_factor(blend_factor),
            strategy: BlendStrategy::Linear,
            max_deviation: DEFAULT_MAX_DEVIATION,
            normalizer: WeightNormalizer::default(),
        }
    }

    /// Clamped blender: the softmax weight may move at most
    /// `max_deviation` points away from the user weight.
    #[must_use]
    pub fn clamped(max_deviation: f64) -> Self {
        Self::new(DEFAULT_BLEND_FACTOR)
            .with_strategy(BlendStrategy::Clamped)
            .with_max_deviation(max_deviation)
    }

    /// Set the blend strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: BlendStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the clamped-strategy deviation; negative or non-finite values
    /// fall back to the default.
    #[must_use]
    pub fn with_max_deviation(mut self, max_deviation: f64) -> Self {
        self.max_deviation = if max_deviation.is_finite() && max_deviation >= 0.0 {
            max_deviation
        } else {
            tracing::warn!(
                "Invalid max deviation {max_deviation}, using {DEFAULT_MAX_DEVIATION}"
            );
            DEFAULT_MAX_DEVIATION
        };
        self
    }

    /// Set the normalizer used for the final renormalization.
    #[must_use]
    pub const fn with_normalizer(mut self, normalizer: WeightNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The blend factor in use.
    #[must_use]
    pub const fn blend_factor(&self) -> f64 {
        self.blend_factor
    }

    /// The blend strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> BlendStrategy {
        self.strategy
    }

    /// Blend `user` and `softmax` weights into adjusted weights.
    ///
    /// Fails only when both inputs are empty.
    pub fn blend(&self, user: &WeightMap, softmax: &WeightMap) -> Result<WeightMap> {
        let mut blended = WeightMap::with_capacity(user.len().max(softmax.len()));
        for key in user.keys().chain(softmax.keys()) {
            if blended.contains_key(key) {
                continue;
            }
            let user_weight = non_negative(user.get(key).copied());
            let softmax_weight = non_negative(softmax.get(key).copied());
            blended.insert(key.clone(), self.combine(user_weight, softmax_weight));
        }

        if blended.is_empty() {
            return Err(ReadinessError::empty_weights(
                "blend: user and softmax weights are both empty",
            ));
        }

        self.normalizer.normalize(&blended)
    }

    fn combine(&self, user: f64, softmax: f64) -> f64 {
        match self.strategy {
            BlendStrategy::Linear => {
                user.mul_add(1.0 - self.blend_factor, softmax * self.blend_factor)
            }
            BlendStrategy::Clamped => {
                let low = (user - self.max_deviation).max(0.0);
                let high = user + self.max_deviation;
                softmax.clamp(low, high)
            }
        }
    }
}

fn sanitize_blend_factor(blend_factor: f64) -> f64 {
    if !blend_factor.is_finite() {
        tracing::warn!("Blend factor {blend_factor} is not finite, using {DEFAULT_BLEND_FACTOR}");
        return DEFAULT_BLEND_FACTOR;
    }
    if !(0.0..=1.0).contains(&blend_factor) {
        tracing::warn!("Blend factor {blend_factor} outside [0, 1], clamping");
    }
    blend_factor.clamp(0.0, 1.0)
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// Linear blend with the default normalizer.
pub fn blend(user: &WeightMap, softmax: &WeightMap, blend_factor: f64) -> Result<WeightMap> {
    WeightBlender::new(blend_factor).blend(user, softmax)
}
