//! Engine and CLI integration tests.
//!
//! These tests exercise the full load → assess → report pipeline and the
//! record deduplication path with real fixture files.

use readiness_engine::assessment::{AssessmentStatus, AssessmentSummary, deduplicate_values};
use readiness_engine::config::{ConfigPreset, EngineConfig};
use readiness_engine::model::sums_to_total;
use readiness_engine::pipeline::{
    format_report_summary, load_assessment_with_context, load_records_with_context,
};
use readiness_engine::scoring::Priority;
use readiness_engine::weights::QValueSource;
use readiness_engine::{AssessmentInput, ReadinessEngine, ReadinessLevel, WeightMap};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn load_fixture(name: &str) -> AssessmentInput {
    load_assessment_with_context(&fixture_path(name), true).expect("fixture should load")
}

// ============================================================================
// Scoring Tests
// ============================================================================

mod scoring {
    use super::*;

    #[test]
    fn weighted_fixture_scores_as_expected() {
        let report = ReadinessEngine::default()
            .assess(&load_fixture("assessment.json"))
            .expect("assessment should score");

        assert_eq!(report.assessment_type.as_deref(), Some("enterprise"));

        // Equal Q-values give an even softmax split: 33.4 / 33.3 / 33.3
        let weights = report.category_weights();
        assert!((weights["Strategy"] - 31.0).abs() < 1e-9);
        assert!((weights["Data"] - 38.0).abs() < 1e-9);
        assert!((weights["Talent"] - 31.0).abs() < 1e-9);

        let data = report.category("Data").expect("Data category");
        assert!((data.subcategory("Quality").expect("Quality").score() - 87.5).abs() < 1e-9);
        assert!((data.score() - 63.75).abs() < 1e-9);
        assert!((report.category("Talent").expect("Talent").score() - 50.0).abs() < 1e-9);

        // 72 * 0.31 + 63.75 * 0.38 + 50 * 0.31
        assert!((report.overall_score - 62.045).abs() < 1e-6);
        assert_eq!(report.level, ReadinessLevel::Rise);
        assert!(!report.has_warnings());
    }

    #[test]
    fn yaml_and_json_fixtures_agree() {
        let engine = ReadinessEngine::default();
        let from_json = engine.assess(&load_fixture("assessment.json")).unwrap();
        let from_yaml = engine.assess(&load_fixture("assessment.yaml")).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn gaps_are_ranked_by_weighted_impact() {
        let report = ReadinessEngine::default()
            .assess(&load_fixture("assessment.json"))
            .unwrap();

        let order: Vec<&str> = report.gaps.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(order, vec!["Talent", "Data", "Strategy"]);
        assert_eq!(report.gaps[0].priority, Priority::High);
        assert_eq!(report.gaps[1].priority, Priority::Medium);
        assert_eq!(report.top_gaps(2).len(), 2);
    }

    #[test]
    fn unweighted_fixture_falls_back_and_stays_normalized() {
        let report = ReadinessEngine::default()
            .assess(&load_fixture("unweighted.json"))
            .unwrap();

        assert_eq!(report.categories.len(), 5);
        assert!(sums_to_total(&report.category_weights()));
        for category in &report.categories {
            assert_eq!(category.record.user_weight(), 20.0);
            assert_eq!(category.record.q_value_source(), QValueSource::Synthetic);
            assert!(category.record.adjusted_weight() >= 0.0);
        }
        assert_eq!(report.category("Ethics").unwrap().score(), 0.0);
        assert!(report.has_warnings());
        assert!((0.0..=100.0).contains(&report.overall_score));
    }

    #[test]
    fn user_led_preset_stays_closer_to_user_weights() {
        let input = load_fixture("unweighted.json");
        let default_report = ReadinessEngine::default().assess(&input).unwrap();
        let user_led = ReadinessEngine::new(&EngineConfig::from_preset(ConfigPreset::UserLed))
            .assess(&input)
            .unwrap();

        let drift = |weights: &WeightMap| -> f64 {
            weights.values().map(|w| (w - 20.0).abs()).sum()
        };
        assert!(
            drift(&user_led.category_weights()) <= drift(&default_report.category_weights()) + 0.5
        );
    }

    #[test]
    fn report_summary_lists_every_category() {
        let report = ReadinessEngine::default()
            .assess(&load_fixture("assessment.json"))
            .unwrap();
        let summary = format_report_summary(&report, 3);
        for name in ["Strategy", "Data", "Talent"] {
            assert!(summary.contains(name), "summary missing {name}");
        }
        assert!(summary.contains("AI Rise"));
    }

    #[test]
    fn json_report_uses_camel_case_fields() {
        let report = ReadinessEngine::default()
            .assess(&load_fixture("assessment.json"))
            .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["overallScore"].is_number());
        assert!(value["categories"][0]["adjustedWeight"].is_number());
        assert_eq!(value["level"], "rise");
    }
}

// ============================================================================
// Deduplication Tests
// ============================================================================

mod dedup {
    use super::*;

    #[test]
    fn records_fixture_keeps_one_record_per_type() {
        let values = load_records_with_context(&fixture_path("records.json"), true).unwrap();
        assert_eq!(values.len(), 7);

        let records = deduplicate_values(&values).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a3", "b2", "c1"]);
        assert_eq!(records[1].status, AssessmentStatus::InProgress);
        assert_eq!(records[2].status, AssessmentStatus::Unknown);
    }

    #[test]
    fn summary_counts_canonical_records() {
        let values = load_records_with_context(&fixture_path("records.json"), true).unwrap();
        let records = deduplicate_values(&values).unwrap();
        let summary = AssessmentSummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.average_completed_score, Some(75.0));
    }

    #[test]
    fn canonical_records_read_back_losslessly() {
        let values = load_records_with_context(&fixture_path("records.json"), true).unwrap();
        let records = deduplicate_values(&values).unwrap();

        let serialized: Vec<serde_json::Value> = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();
        let reread = deduplicate_values(&serialized).unwrap();
        assert_eq!(records, reread);
    }
}
