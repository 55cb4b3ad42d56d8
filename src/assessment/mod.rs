//! Assessment records: canonical shape, deduplication, and summaries.

mod dedup;
mod record;
mod summary;

pub use dedup::{compare_records, deduplicate, deduplicate_values};
pub use record::{AssessmentRecord, AssessmentStatus, parse_timestamp};
pub use summary::AssessmentSummary;
