//! Configuration module for readiness-engine.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common weighting policies
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```
//! use readiness_engine::config::{ConfigPreset, EngineConfig};
//! use readiness_engine::weights::BlendStrategy;
//!
//! // Use defaults
//! let config = EngineConfig::default();
//!
//! // Use a preset
//! let config = EngineConfig::from_preset(ConfigPreset::Constrained);
//!
//! // Use builder
//! let config = EngineConfig::builder()
//!     .blend_factor(0.4)
//!     .blend_strategy(BlendStrategy::Linear)
//!     .learning(true)
//!     .build();
//! ```
//!
//! # Configuration File
//!
//! Place a `.readiness-engine.yaml` file in your project root or
//! `~/.config/readiness-engine/`:
//!
//! ```yaml
//! blending:
//!   blend_factor: 0.3
//!   strategy: clamped
//! learning:
//!   enabled: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_TOP_GAPS, LEARNED_BLEND_FACTOR, USER_LED_BLEND_FACTOR};
pub use types::{
    AnswerScaleConfig, BlendingConfig, EngineConfig, EngineConfigBuilder, LearningConfig,
    NormalizationConfig, ReportConfig, SoftmaxConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, config_search_dirs, discover_config_file,
    generate_example_config, generate_full_example_config, load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `EngineConfig` configuration format.
///
/// Documents every option accepted in `.readiness-engine.yaml` files, for
/// editor validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(EngineConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
