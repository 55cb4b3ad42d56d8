//! Scoring: answers to scores, scores to composites, composites to gaps.
//!
//! - [`LikertScale`] / [`score_answers`]: questionnaire answers to 0-100 scores
//! - [`aggregate`] / [`aggregate_hierarchy`]: weight-adjusted composites
//! - [`analyze_gaps`]: gap-to-maximum ranked by weighted impact
//! - [`ReadinessLevel`]: tier for an overall score

mod aggregator;
mod answers;
mod gaps;
mod level;

pub use aggregator::{
    Aggregation, CategoryScores, HierarchicalAggregation, KeySetIssue, KeySetWarning, aggregate,
    aggregate_hierarchy,
};
pub use answers::{DEFAULT_LIKERT_MAX, DEFAULT_LIKERT_MIN, LikertScale, score_answers};
pub use gaps::{
    GapAnalysisEntry, HIGH_IMPACT_THRESHOLD, MEDIUM_IMPACT_THRESHOLD, Priority, analyze_gaps,
    top_gaps,
};
pub use level::ReadinessLevel;
