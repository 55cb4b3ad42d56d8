//! Property-based tests for weight reconciliation and scoring.
//!
//! Ensures the numeric contracts hold across random inputs: every weight map
//! sums to 100, softmax preserves Q-value order, blending interpolates
//! between its inputs, and deduplication is idempotent.

use proptest::prelude::*;
use readiness_engine::assessment::{AssessmentRecord, AssessmentStatus, deduplicate};
use readiness_engine::model::{WEIGHT_SUM_TOLERANCE, sums_to_total, total};
use readiness_engine::scoring::{aggregate, analyze_gaps};
use readiness_engine::weights::{blend, distribute_even, normalize, softmax};
use readiness_engine::{QValueMap, ScoreMap, WeightMap};

fn keyed(values: &[f64]) -> WeightMap {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("k{i}"), *v))
        .collect()
}

fn garbage_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0_f64..1000.0,
        -1000.0_f64..0.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(f64::MIN_POSITIVE),
    ]
}

fn status_strategy() -> impl Strategy<Value = AssessmentStatus> {
    prop_oneof![
        Just(AssessmentStatus::Completed),
        Just(AssessmentStatus::InProgress),
        Just(AssessmentStatus::NotStarted),
        Just(AssessmentStatus::Unknown),
    ]
}

fn record_strategy() -> impl Strategy<Value = AssessmentRecord> {
    (
        0_u32..1000,
        "(governance|data|talent|ethics)",
        status_strategy(),
        proptest::option::of(0_i64..2_000_000_000),
    )
        .prop_map(|(id, kind, status, completed_at)| {
            let record = AssessmentRecord::new(id.to_string(), kind, status);
            match completed_at.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)) {
                Some(at) => record.with_completed_at(at),
                None => record,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_sums_to_total(values in prop::collection::vec(0.0_f64..1000.0, 1..20)) {
        let normalized = normalize(&keyed(&values)).unwrap();
        prop_assert_eq!(normalized.len(), values.len());
        prop_assert!(sums_to_total(&normalized), "sum was {}", total(&normalized));
        prop_assert!(normalized.values().all(|w| *w >= 0.0));
    }

    #[test]
    fn normalize_tolerates_garbage(values in prop::collection::vec(garbage_weight(), 1..12)) {
        let normalized = normalize(&keyed(&values)).unwrap();
        prop_assert!(sums_to_total(&normalized));
        prop_assert!(normalized.values().all(|w| w.is_finite() && *w >= 0.0));
    }

    #[test]
    fn distribute_even_sums_to_total(count in 1_usize..40) {
        let weights = distribute_even((0..count).map(|i| format!("k{i}")));
        prop_assert_eq!(weights.len(), count);
        prop_assert!(sums_to_total(&weights));
    }

    #[test]
    fn softmax_is_a_distribution(q in prop::collection::vec(-5.0_f64..5.0, 1..20)) {
        let weights = softmax(&keyed(&q));
        prop_assert!(sums_to_total(&weights), "sum was {}", total(&weights));
        prop_assert!(weights.values().all(|w| *w >= 0.0));
    }

    #[test]
    fn softmax_favors_highest_q_value(q in prop::collection::vec(0.0_f64..1.0, 2..20)) {
        let q_values: QValueMap = keyed(&q);
        let weights = softmax(&q_values);
        let (best_key, _) = q_values
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        let best_weight = weights[best_key];
        prop_assert!(weights.values().all(|w| *w <= best_weight));
    }

    #[test]
    fn blend_endpoints_return_inputs(
        user in prop::collection::vec(0.0_f64..100.0, 2..10),
        q in prop::collection::vec(0.0_f64..1.0, 2..10),
    ) {
        let len = user.len().min(q.len());
        let user: WeightMap = normalize(&keyed(&user[..len])).unwrap();
        let soft: WeightMap = softmax(&keyed(&q[..len]));

        let at_zero = blend(&user, &soft, 0.0).unwrap();
        let at_one = blend(&user, &soft, 1.0).unwrap();
        for key in user.keys() {
            prop_assert!((at_zero[key] - user[key]).abs() <= WEIGHT_SUM_TOLERANCE + 1e-9);
            prop_assert!((at_one[key] - soft[key]).abs() <= WEIGHT_SUM_TOLERANCE + 1e-9);
        }
    }

    #[test]
    fn blend_stays_normalized(
        user in prop::collection::vec(0.0_f64..100.0, 1..10),
        q in prop::collection::vec(0.0_f64..1.0, 1..10),
        factor in 0.0_f64..=1.0,
    ) {
        let adjusted = blend(&keyed(&user), &softmax(&keyed(&q)), factor).unwrap();
        prop_assert_eq!(adjusted.len(), user.len().max(q.len()));
        prop_assert!(sums_to_total(&adjusted));
        prop_assert!(adjusted.values().all(|w| *w >= 0.0));
    }

    #[test]
    fn aggregate_is_bounded_by_scores(
        scores in prop::collection::vec(0.0_f64..=100.0, 1..12),
        raw_weights in prop::collection::vec(0.0_f64..100.0, 12),
    ) {
        let scores: ScoreMap = keyed(&scores);
        let weights = normalize(&keyed(&raw_weights[..scores.len()])).unwrap();
        let aggregation = aggregate(&scores, &weights);

        let lowest = scores.values().copied().fold(f64::INFINITY, f64::min);
        let highest = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(aggregation.is_consistent());
        prop_assert!((0.0..=100.0).contains(&aggregation.overall));
        prop_assert!(aggregation.overall <= highest + WEIGHT_SUM_TOLERANCE + 1e-9);
        prop_assert!(aggregation.overall >= lowest - WEIGHT_SUM_TOLERANCE - 1e-9);
    }

    #[test]
    fn gaps_are_sorted_by_impact(
        scores in prop::collection::vec(0.0_f64..=100.0, 1..12),
        raw_weights in prop::collection::vec(0.0_f64..100.0, 12),
    ) {
        let scores: ScoreMap = keyed(&scores);
        let weights = normalize(&keyed(&raw_weights[..scores.len()])).unwrap();
        let gaps = analyze_gaps(&scores, &weights);

        prop_assert_eq!(gaps.len(), scores.len());
        for pair in gaps.windows(2) {
            prop_assert!(pair[0].impact >= pair[1].impact);
        }
        for gap in &gaps {
            prop_assert!(gap.impact <= gap.gap + 1e-9);
        }
    }

    #[test]
    fn deduplicate_is_idempotent(records in prop::collection::vec(record_strategy(), 0..30)) {
        let once = deduplicate(&records);
        let twice = deduplicate(&once);
        prop_assert_eq!(&once, &twice);

        let mut types: Vec<&str> = once.iter().map(|r| r.assessment_type.as_str()).collect();
        let count = types.len();
        types.sort_unstable();
        types.dedup();
        prop_assert_eq!(types.len(), count);
    }

    #[test]
    fn deduplicate_keeps_highest_status(
        records in prop::collection::vec(record_strategy(), 1..30),
    ) {
        for kept in deduplicate(&records) {
            let best = records
                .iter()
                .filter(|r| r.assessment_type == kept.assessment_type)
                .map(|r| r.status.priority())
                .max()
                .unwrap_or(0);
            prop_assert_eq!(kept.status.priority(), best);
        }
    }
}
