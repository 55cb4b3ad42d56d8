//! Canonical record selection.
//!
//! Repeated submissions leave several records per assessment type. One
//! record per type survives: the highest status priority wins, and among
//! completed records the most recent completion wins.

use super::record::{AssessmentRecord, AssessmentStatus};
use crate::error::Result;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;
use std::cmp::Ordering;

/// Order two records of the same type; `Greater` means `a` is preferred.
///
/// A missing completion time ranks below any timestamp. Records that are
/// not completed only compare by status.
#[must_use]
pub fn compare_records(a: &AssessmentRecord, b: &AssessmentRecord) -> Ordering {
    a.status
        .priority()
        .cmp(&b.status.priority())
        .then_with(|| {
            if a.status == AssessmentStatus::Completed && b.status == AssessmentStatus::Completed {
                a.completed_at.cmp(&b.completed_at)
            } else {
                Ordering::Equal
            }
        })
}

/// Keep one canonical record per assessment type.
///
/// Output follows the order in which each type first appears. On a full tie
/// the earlier record is kept, so the result is stable and applying it to
/// its own output changes nothing.
#[must_use]
pub fn deduplicate(records: &[AssessmentRecord]) -> Vec<AssessmentRecord> {
    let mut winners: IndexMap<&str, &AssessmentRecord> = IndexMap::new();

    for record in records {
        match winners.entry(record.assessment_type.as_str()) {
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
            Entry::Occupied(mut entry) => {
                if compare_records(record, entry.get()) == Ordering::Greater {
                    tracing::debug!(
                        "'{}': record '{}' ({}) replaces '{}' ({})",
                        record.assessment_type,
                        record.id,
                        record.status,
                        entry.get().id,
                        entry.get().status
                    );
                    entry.insert(record);
                }
            }
        }
    }

    if winners.len() < records.len() {
        tracing::info!(
            "Deduplicated {} records into {} assessment types",
            records.len(),
            winners.len()
        );
    }

    winners.into_values().cloned().collect()
}

/// Read raw payloads into canonical records and deduplicate them.
///
/// Fails on the first payload that is not an object or has no type.
pub fn deduplicate_values(values: &[Value]) -> Result<Vec<AssessmentRecord>> {
    let records = values
        .iter()
        .enumerate()
        .map(|(index, value)| AssessmentRecord::from_value(value, index))
        .collect::<Result<Vec<_>>>()?;
    Ok(deduplicate(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn record(id: &str, kind: &str, status: AssessmentStatus) -> AssessmentRecord {
        AssessmentRecord::new(id, kind, status)
    }

    #[test]
    fn test_completed_beats_in_progress() {
        let values = vec![
            json!({"id": "1", "type": "X", "status": "in-progress"}),
            json!({"id": "2", "type": "X", "status": "completed", "completedAt": "2024-01-01"}),
        ];
        let result = deduplicate_values(&values).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn test_status_wins_regardless_of_timestamp() {
        let older_completed = record("old", "X", AssessmentStatus::Completed)
            .with_completed_at(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let newer_not_started = record("new", "X", AssessmentStatus::NotStarted)
            .with_completed_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        let result = deduplicate(&[newer_not_started, older_completed]);
        assert_eq!(result[0].id, "old");
    }

    #[test]
    fn test_latest_completion_wins() {
        let early = record("early", "X", AssessmentStatus::Completed)
            .with_completed_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let late = record("late", "X", AssessmentStatus::Completed)
            .with_completed_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        assert_eq!(deduplicate(&[early.clone(), late.clone()])[0].id, "late");
        assert_eq!(deduplicate(&[late, early])[0].id, "late");
    }

    #[test]
    fn test_missing_timestamp_ranks_lower() {
        let undated = record("undated", "X", AssessmentStatus::Completed);
        let dated = record("dated", "X", AssessmentStatus::Completed)
            .with_completed_at(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap());

        assert_eq!(deduplicate(&[undated, dated])[0].id, "dated");
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let first = record("first", "X", AssessmentStatus::InProgress);
        let second = record("second", "X", AssessmentStatus::InProgress);
        assert_eq!(deduplicate(&[first, second])[0].id, "first");
    }

    #[test]
    fn test_unknown_status_ranks_lowest() {
        let unknown = record("u", "X", AssessmentStatus::Unknown);
        let not_started = record("n", "X", AssessmentStatus::NotStarted);
        assert_eq!(deduplicate(&[unknown, not_started])[0].id, "n");
    }

    #[test]
    fn test_one_record_per_type_in_first_seen_order() {
        let records = vec![
            record("1", "data", AssessmentStatus::NotStarted),
            record("2", "governance", AssessmentStatus::Completed),
            record("3", "data", AssessmentStatus::InProgress),
            record("4", "talent", AssessmentStatus::Unknown),
        ];
        let result = deduplicate(&records);
        let types: Vec<&str> = result.iter().map(|r| r.assessment_type.as_str()).collect();
        assert_eq!(types, vec!["data", "governance", "talent"]);
        assert_eq!(result[0].id, "3");
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("1", "a", AssessmentStatus::InProgress),
            record("2", "a", AssessmentStatus::Completed),
            record("3", "b", AssessmentStatus::NotStarted),
        ];
        let once = deduplicate(&records);
        assert_eq!(deduplicate(&once), once);
    }

    #[test]
    fn test_untyped_value_fails() {
        let values = vec![json!({"type": "a"}), json!({"status": "completed"})];
        assert!(deduplicate_values(&values).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(&[]).is_empty());
    }
}
