//! Configuration types for the readiness engine.

use super::defaults::DEFAULT_TOP_GAPS;
use crate::scoring::{DEFAULT_LIKERT_MAX, DEFAULT_LIKERT_MIN};
use crate::weights::{
    BlendStrategy, DEFAULT_ALPHA, DEFAULT_BLEND_FACTOR, DEFAULT_GAMMA, DEFAULT_ITERATIONS,
    DEFAULT_MAX_DEVIATION, DEFAULT_SOFTMAX_ETA, DEFAULT_SYNTHETIC_SEED, ResidualTarget,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Engine Configuration
// ============================================================================

/// Top-level engine configuration.
///
/// Every section falls back to its defaults, so a config file only needs to
/// name the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// How user and softmax weights are combined
    pub blending: BlendingConfig,
    /// Rounding residual handling
    pub normalization: NormalizationConfig,
    /// Q-value to weight transformation
    pub softmax: SoftmaxConfig,
    /// Q-value learning and synthetic fallback
    pub learning: LearningConfig,
    /// Questionnaire answer scale
    pub answers: AnswerScaleConfig,
    /// Report shaping
    pub report: ReportConfig,
}

impl EngineConfig {
    /// Create an `EngineConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `EngineConfig` builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

// ============================================================================
// Builder for EngineConfig
// ============================================================================

/// Builder for constructing `EngineConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the blend factor.
    pub const fn blend_factor(mut self, blend_factor: f64) -> Self {
        self.config.blending.blend_factor = blend_factor;
        self
    }

    /// Set the blend strategy.
    pub const fn blend_strategy(mut self, strategy: BlendStrategy) -> Self {
        self.config.blending.strategy = strategy;
        self
    }

    /// Set the clamped-strategy deviation.
    pub const fn max_deviation(mut self, max_deviation: f64) -> Self {
        self.config.blending.max_deviation = max_deviation;
        self
    }

    /// Set the residual target.
    pub const fn residual_target(mut self, target: ResidualTarget) -> Self {
        self.config.normalization.residual_target = target;
        self
    }

    /// Set the softmax scaling factor.
    pub const fn softmax_eta(mut self, eta: f64) -> Self {
        self.config.softmax.eta = eta;
        self
    }

    /// Enable or disable category-level Q-value learning.
    pub const fn learning(mut self, enabled: bool) -> Self {
        self.config.learning.enabled = enabled;
        self
    }

    /// Set the synthetic Q-value seed.
    pub const fn synthetic_seed(mut self, seed: u64) -> Self {
        self.config.learning.synthetic_seed = seed;
        self
    }

    /// Set the answer scale.
    pub const fn answer_scale(mut self, min: u8, max: u8) -> Self {
        self.config.answers.min = min;
        self.config.answers.max = max;
        self
    }

    /// Set how many gaps the summary lists.
    pub const fn top_gaps(mut self, top_gaps: usize) -> Self {
        self.config.report.top_gaps = top_gaps;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Weight blending configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BlendingConfig {
    /// Share of the softmax signal in the adjusted weight (0.0-1.0)
    pub blend_factor: f64,
    /// Blend strategy: linear or clamped
    pub strategy: BlendStrategy,
    /// Maximum deviation from the user weight, in percentage points (clamped only)
    pub max_deviation: f64,
}

impl Default for BlendingConfig {
    fn default() -> Self {
        Self {
            blend_factor: DEFAULT_BLEND_FACTOR,
            strategy: BlendStrategy::default(),
            max_deviation: DEFAULT_MAX_DEVIATION,
        }
    }
}

/// Normalization configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Entry receiving the rounding residual: first-key, last-key or largest
    pub residual_target: ResidualTarget,
}

/// Softmax configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SoftmaxConfig {
    /// Scaling factor applied to Q-value differences (0 gives a uniform distribution)
    pub eta: f64,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        Self {
            eta: DEFAULT_SOFTMAX_ETA,
        }
    }
}

/// Q-value learning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LearningConfig {
    /// Refine category Q-values from user weights and scores
    pub enabled: bool,
    /// Learning rate (0.0-1.0)
    pub alpha: f64,
    /// Discount factor (0.0-1.0)
    pub gamma: f64,
    /// Number of update sweeps
    pub iterations: u32,
    /// Seed for synthetic Q-values when none are supplied
    pub synthetic_seed: u64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            iterations: DEFAULT_ITERATIONS,
            synthetic_seed: DEFAULT_SYNTHETIC_SEED,
        }
    }
}

/// Answer scale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnswerScaleConfig {
    /// Lowest valid answer
    pub min: u8,
    /// Highest valid answer
    pub max: u8,
}

impl Default for AnswerScaleConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_LIKERT_MIN,
            max: DEFAULT_LIKERT_MAX,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of highest-impact gaps shown in summaries
    pub top_gaps: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_gaps: DEFAULT_TOP_GAPS,
        }
    }
}
