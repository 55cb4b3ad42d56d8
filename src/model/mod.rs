//! Shared data model for the scoring engine.
//!
//! All maps are keyed by category or subcategory name and preserve insertion
//! order. Order carries no meaning for the numbers themselves, but it is the
//! deterministic order used for residual correction, tie-breaking and output.

mod maps;

pub use maps::*;
