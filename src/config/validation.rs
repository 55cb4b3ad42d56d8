//! Configuration validation for the readiness engine.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{
    AnswerScaleConfig, BlendingConfig, EngineConfig, LearningConfig, ReportConfig, SoftmaxConfig,
};

/// Upper bound on learner sweeps.
const MAX_ITERATIONS: u32 = 10_000;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for EngineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.blending.validate());
        errors.extend(self.softmax.validate());
        errors.extend(self.learning.validate());
        errors.extend(self.answers.validate());
        errors.extend(self.report.validate());
        errors
    }
}

impl Validatable for BlendingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.blend_factor) {
            errors.push(ConfigError::new(
                "blending.blend_factor",
                format!(
                    "Blend factor must be between 0.0 and 1.0, got {}",
                    self.blend_factor
                ),
            ));
        }
        if !self.max_deviation.is_finite() || self.max_deviation < 0.0 {
            errors.push(ConfigError::new(
                "blending.max_deviation",
                format!(
                    "Max deviation must be a non-negative number, got {}",
                    self.max_deviation
                ),
            ));
        }
        errors
    }
}

impl Validatable for SoftmaxConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.eta.is_finite() && self.eta >= 0.0 {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "softmax.eta",
                format!("Eta must be a non-negative number, got {}", self.eta),
            )]
        }
    }
}

impl Validatable for LearningConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            errors.push(ConfigError::new(
                "learning.alpha",
                format!("Alpha must be in (0.0, 1.0], got {}", self.alpha),
            ));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            errors.push(ConfigError::new(
                "learning.gamma",
                format!("Gamma must be between 0.0 and 1.0, got {}", self.gamma),
            ));
        }
        if self.iterations > MAX_ITERATIONS {
            errors.push(ConfigError::new(
                "learning.iterations",
                format!(
                    "At most {MAX_ITERATIONS} iterations are allowed, got {}",
                    self.iterations
                ),
            ));
        }
        errors
    }
}

impl Validatable for AnswerScaleConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.min < self.max {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "answers",
                format!(
                    "Scale minimum ({}) must be below maximum ({})",
                    self.min, self.max
                ),
            )]
        }
    }
}

impl Validatable for ReportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.top_gaps == 0 {
            vec![ConfigError::new(
                "report.top_gaps",
                "At least one gap must be shown",
            )]
        } else {
            Vec::new()
        }
    }
}
