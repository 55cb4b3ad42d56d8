//! Weight reconciliation.
//!
//! Turns user-assigned importance weights and learned Q-values into a single
//! set of adjusted weights:
//!
//! - **[`WeightNormalizer`]**: scales any weight map to sum to exactly 100
//! - **[`SoftmaxTransformer`]**: converts Q-values into percentage weights
//! - **[`WeightBlender`]**: mixes user and softmax weights, then renormalizes
//! - **[`QValueLearner`]**: iterative Q-value update, plus deterministic
//!   synthetic Q-values for when none are available
//!
//! # Usage
//!
//! ```
//! use readiness_engine::weights::{blend, normalize, softmax};
//! use readiness_engine::{QValueMap, WeightMap};
//!
//! let mut user = WeightMap::new();
//! user.insert("Strategy".to_string(), 3.0);
//! user.insert("Data".to_string(), 1.0);
//!
//! let mut q = QValueMap::new();
//! q.insert("Strategy".to_string(), 0.2);
//! q.insert("Data".to_string(), 0.8);
//!
//! let user = normalize(&user).unwrap();
//! let adjusted = blend(&user, &softmax(&q), 0.3).unwrap();
//! let total: f64 = adjusted.values().sum();
//! assert!((total - 100.0).abs() <= 0.1);
//! ```

mod blend;
mod learning;
mod normalizer;
mod softmax;

pub use blend::{
    BlendStrategy, DEFAULT_BLEND_FACTOR, DEFAULT_MAX_DEVIATION, WeightBlender, blend,
};
pub use learning::{
    DEFAULT_ALPHA, DEFAULT_GAMMA, DEFAULT_ITERATIONS, DEFAULT_SYNTHETIC_SEED, QValueLearner,
    QValueSource, synthetic_q_value, synthetic_q_values,
};
pub use normalizer::{
    ResidualTarget, WeightNormalizer, distribute_even, normalize, round_one_decimal,
};
pub use softmax::{DEFAULT_SOFTMAX_ETA, SoftmaxTransformer, softmax};
