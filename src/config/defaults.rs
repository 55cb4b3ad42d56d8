//! Default configurations and presets for the readiness engine.
//!
//! Provides named presets for common weighting policies and default values.

use super::types::{BlendingConfig, EngineConfig, LearningConfig};
use crate::weights::BlendStrategy;

// ============================================================================
// Default Values
// ============================================================================

/// Default number of gaps listed in summaries.
pub const DEFAULT_TOP_GAPS: usize = 5;

/// Blend factor of the user-led preset.
pub const USER_LED_BLEND_FACTOR: f64 = 0.1;

/// Blend factor of the learned preset.
pub const LEARNED_BLEND_FACTOR: f64 = 0.5;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common weighting policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Linear blend at 0.3 with synthetic Q-values
    Default,
    /// User weights dominate the blend
    UserLed,
    /// Softmax weights may only move user weights by a few points
    Constrained,
    /// Category Q-values are learned and weigh as much as the user
    Learned,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::UserLed => "user-led",
            Self::Constrained => "constrained",
            Self::Learned => "learned",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "user-led" | "user" | "manual" => Some(Self::UserLed),
            "constrained" | "clamped" => Some(Self::Constrained),
            "learned" | "learning" | "adaptive" => Some(Self::Learned),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "70% user weight, 30% softmax weight, synthetic Q-values",
            Self::UserLed => "90% user weight, softmax only nudges the result",
            Self::Constrained => "Softmax weight clamped to within 2 points of the user weight",
            Self::Learned => "Learned category Q-values blended 50/50 with user weights",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::UserLed, Self::Constrained, Self::Learned]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl EngineConfig {
    /// Create an `EngineConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::UserLed => Self::user_led_preset(),
            ConfigPreset::Constrained => Self::constrained_preset(),
            ConfigPreset::Learned => Self::learned_preset(),
        }
    }

    /// User-led preset: the softmax signal only contributes 10%.
    #[must_use]
    pub fn user_led_preset() -> Self {
        Self {
            blending: BlendingConfig {
                blend_factor: USER_LED_BLEND_FACTOR,
                ..BlendingConfig::default()
            },
            ..Self::default()
        }
    }

    /// Constrained preset.
    ///
    /// - Clamped blending, softmax weight kept within ±2 points of the user weight
    /// - Result renormalized to 100
    #[must_use]
    pub fn constrained_preset() -> Self {
        Self {
            blending: BlendingConfig {
                strategy: BlendStrategy::Clamped,
                ..BlendingConfig::default()
            },
            ..Self::default()
        }
    }

    /// Learned preset.
    ///
    /// - Category Q-values refined by the learner before softmax
    /// - Equal share for user and softmax weights
    #[must_use]
    pub fn learned_preset() -> Self {
        Self {
            blending: BlendingConfig {
                blend_factor: LEARNED_BLEND_FACTOR,
                ..BlendingConfig::default()
            },
            learning: LearningConfig {
                enabled: true,
                ..LearningConfig::default()
            },
            ..Self::default()
        }
    }
}
