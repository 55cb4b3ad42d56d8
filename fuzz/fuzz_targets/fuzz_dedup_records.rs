#![no_main]
use libfuzzer_sys::fuzz_target;
use readiness_engine::assessment::{deduplicate, deduplicate_values};
use readiness_engine::pipeline::records_from_json_str;

/// Fuzz record extraction and deduplication.
///
/// Deduplicating an already deduplicated set must be a no-op.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(values) = records_from_json_str(s) else {
        return;
    };
    if let Ok(records) = deduplicate_values(&values) {
        assert_eq!(deduplicate(&records), records);
    }
});
