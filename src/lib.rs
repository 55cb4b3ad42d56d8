//! **Weight reconciliation and scoring for AI-readiness assessments.**
//!
//! `readiness-engine` turns a questionnaire-style assessment into a composite
//! readiness score. Every category carries two competing notions of
//! importance: the weight a user declared, and a learned importance signal
//! (a Q-value). The engine reconciles the two into one set of adjusted
//! weights, scores the assessment with them, and ranks where improvement
//! would pay off most.
//!
//! ## Core Concepts & Modules
//!
//! - **[`weights`]**: normalization to 100, softmax over Q-values, blending of
//!   user and learned weights, and the Q-value learner.
//! - **[`scoring`]**: Likert answers to 0-100 scores, weighted aggregation
//!   (flat and two-level), gap analysis and readiness levels.
//! - **[`assessment`]**: assessment records, their status precedence, and
//!   deduplication to one canonical record per assessment type.
//! - **[`pipeline`]**: the [`ReadinessEngine`] that runs the whole flow over an
//!   [`AssessmentInput`], plus file loading and report output.
//! - **[`config`]**: [`EngineConfig`], presets, validation and YAML config files.
//!
//! ## Getting Started
//!
//! ```
//! use readiness_engine::{AssessmentInput, ReadinessEngine};
//!
//! let input = AssessmentInput::from_json_str(r#"{
//!     "categories": {
//!         "Strategy": { "score": 80, "weight": 60, "qValue": 0.9 },
//!         "Data":     { "score": 40, "weight": 40, "qValue": 0.1 }
//!     }
//! }"#).unwrap();
//!
//! let report = ReadinessEngine::default().assess(&input).unwrap();
//! assert!(report.overall_score > 40.0 && report.overall_score < 80.0);
//!
//! let weights = report.category_weights();
//! let total: f64 = weights.values().sum();
//! assert!((total - 100.0).abs() <= 0.1);
//! ```
//!
//! ## Deduplicating Assessment Records
//!
//! ```
//! use readiness_engine::assessment::deduplicate_values;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": "1", "type": "governance", "status": "in-progress"}),
//!     json!({"id": "2", "type": "governance", "status": "completed"}),
//! ];
//! let canonical = deduplicate_values(&records).unwrap();
//! assert_eq!(canonical.len(), 1);
//! assert_eq!(canonical[0].id, "2");
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `readiness-engine` binary wraps the library with `score`, `dedup` and
//! `config` subcommands; see the project README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize/u32/u8 to f64 casts in averaging and Likert math
    // stay far below the precision limit
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are not written for every fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report and engine assembly functions read better unsplit
    clippy::too_many_lines,
    // Score/weight/q-value names like `score`/`scores` are clear in context
    clippy::similar_names
)]

pub mod assessment;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod scoring;
pub mod weights;

// Re-export main types for convenience
pub use assessment::{AssessmentRecord, AssessmentStatus, AssessmentSummary, deduplicate};
pub use config::{ConfigError, ConfigPreset, EngineConfig, EngineConfigBuilder, Validatable};
pub use error::{ErrorContext, ReadinessError, Result};
pub use model::{MAX_SCORE, QValueMap, ScoreMap, WEIGHT_TOTAL, WeightMap};
pub use pipeline::{AssessmentInput, ReadinessEngine, ReadinessReport};
pub use scoring::{GapAnalysisEntry, Priority, ReadinessLevel};
pub use weights::{
    BlendStrategy, QValueLearner, SoftmaxTransformer, WeightBlender, WeightNormalizer,
};
