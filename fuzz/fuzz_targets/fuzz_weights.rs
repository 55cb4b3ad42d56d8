#![no_main]
use libfuzzer_sys::fuzz_target;
use readiness_engine::WeightMap;
use readiness_engine::model::sums_to_total;
use readiness_engine::weights::{SoftmaxTransformer, blend, normalize, softmax};

/// Fuzz normalization, softmax and blending with arbitrary floats.
fuzz_target!(|data: &[u8]| {
    let values: Vec<f64> = data
        .chunks_exact(8)
        .take(64)
        .map(|chunk| {
            let mut bytes = [0_u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect();
    if values.is_empty() {
        return;
    }
    let map: WeightMap = values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("k{i}"), *v))
        .collect();

    let soft = softmax(&map);
    assert!(sums_to_total(&soft));
    let eta = f64::from(data[0] % 4) * 0.5;
    assert!(sums_to_total(&SoftmaxTransformer::new().with_eta(eta).transform(&map)));
    if let Ok(user) = normalize(&map) {
        assert!(sums_to_total(&user));
        let factor = values[0].abs().fract();
        if let Ok(adjusted) = blend(&user, &soft, factor) {
            assert!(sums_to_total(&adjusted));
        }
    }
});
