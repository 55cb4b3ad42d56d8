#![no_main]
use libfuzzer_sys::fuzz_target;
use readiness_engine::{AssessmentInput, ReadinessEngine};

/// Fuzz assessment decoding and scoring.
///
/// Any JSON document that decodes into an assessment must score without
/// panicking, and the resulting weights must stay normalized.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(input) = AssessmentInput::from_json_str(s) else {
        return;
    };
    if let Ok(report) = ReadinessEngine::default().assess(&input) {
        assert!((0.0..=100.0).contains(&report.overall_score));
        assert!(readiness_engine::model::sums_to_total(&report.category_weights()));
    }
});
