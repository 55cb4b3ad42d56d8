//! Status counts over a set of assessment records.

use super::record::{AssessmentRecord, AssessmentStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-status counts and completion statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub unknown: usize,
    /// Mean score over completed records that carry a score
    pub average_completed_score: Option<f64>,
    /// Most recent completion time
    pub latest_completion: Option<DateTime<Utc>>,
}

impl AssessmentSummary {
    /// Summarize a set of records.
    #[must_use]
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut score_sum = 0.0;
        let mut scored = 0_usize;

        for record in records {
            match record.status {
                AssessmentStatus::Completed => summary.completed += 1,
                AssessmentStatus::InProgress => summary.in_progress += 1,
                AssessmentStatus::NotStarted => summary.not_started += 1,
                AssessmentStatus::Unknown => summary.unknown += 1,
            }

            if record.is_completed()
                && let Some(score) = record.score.filter(|s| s.is_finite())
            {
                score_sum += score;
                scored += 1;
            }

            if record.completed_at > summary.latest_completion {
                summary.latest_completion = record.completed_at;
            }
        }

        if scored > 0 {
            summary.average_completed_score = Some(score_sum / scored as f64);
        }
        summary
    }

    /// Percentage of records that are completed.
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_counts_and_statistics() {
        let latest = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let records = vec![
            AssessmentRecord::new("1", "a", AssessmentStatus::Completed)
                .with_score(80.0)
                .with_completed_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            AssessmentRecord::new("2", "b", AssessmentStatus::Completed)
                .with_score(60.0)
                .with_completed_at(latest),
            AssessmentRecord::new("3", "c", AssessmentStatus::InProgress).with_score(10.0),
            AssessmentRecord::new("4", "d", AssessmentStatus::NotStarted),
            AssessmentRecord::new("5", "e", AssessmentStatus::Unknown),
        ];
        let summary = AssessmentSummary::from_records(&records);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.not_started, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.average_completed_score, Some(70.0));
        assert_eq!(summary.latest_completion, Some(latest));
        assert!((summary.completion_rate() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let summary = AssessmentSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_completed_score, None);
        assert_eq!(summary.completion_rate(), 0.0);
    }
}
