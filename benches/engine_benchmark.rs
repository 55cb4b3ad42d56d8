//! Benchmarks for weight reconciliation and full assessments.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use readiness_engine::config::EngineConfig;
use readiness_engine::pipeline::{AssessmentInput, CategoryInput, SubcategoryInput};
use readiness_engine::weights::{QValueLearner, blend, normalize, softmax, synthetic_q_values};
use readiness_engine::{ReadinessEngine, WeightMap};
use std::hint::black_box;

fn keyed(count: usize, f: impl Fn(usize) -> f64) -> WeightMap {
    (0..count).map(|i| (format!("category-{i}"), f(i))).collect()
}

fn build_assessment(categories: usize, subcategories: usize) -> AssessmentInput {
    let categories = (0..categories)
        .map(|c| {
            let subcategories = (0..subcategories)
                .map(|s| {
                    let sub = SubcategoryInput {
                        answers: vec![((c + s) % 4 + 1) as f64; 6],
                        weight: Some((s % 5 + 1) as f64),
                        ..SubcategoryInput::default()
                    };
                    (format!("sub-{s}"), sub)
                })
                .collect();
            let category = CategoryInput {
                weight: Some((c % 7 + 1) as f64),
                subcategories,
                ..CategoryInput::default()
            };
            (format!("category-{c}"), category)
        })
        .collect();
    AssessmentInput {
        assessment_type: Some("benchmark".to_string()),
        categories,
    }
}

fn bench_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights");
    for size in [5_usize, 50, 500] {
        let user = keyed(size, |i| (i % 9 + 1) as f64);
        let q_values = synthetic_q_values(user.keys(), 0);

        group.bench_with_input(BenchmarkId::new("normalize", size), &user, |b, user| {
            b.iter(|| normalize(black_box(user)));
        });
        group.bench_with_input(BenchmarkId::new("softmax", size), &q_values, |b, q| {
            b.iter(|| softmax(black_box(q)));
        });

        let normalized = normalize(&user).unwrap_or_default();
        let soft = softmax(&q_values);
        group.bench_with_input(
            BenchmarkId::new("blend", size),
            &(normalized, soft),
            |b, (user, soft)| {
                b.iter(|| blend(black_box(user), black_box(soft), 0.3));
            },
        );
    }
    group.finish();
}

fn bench_learning(c: &mut Criterion) {
    let user = keyed(12, |i| (i + 1) as f64);
    let scores = keyed(12, |i| (i * 8) as f64);
    let q_values = synthetic_q_values(user.keys(), 0);
    let learner = QValueLearner::default();

    c.bench_function("learn_12_categories", |b| {
        b.iter(|| learner.learn(black_box(&q_values), &user, &scores));
    });
}

fn bench_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess");
    let engine = ReadinessEngine::new(&EngineConfig::builder().learning(true).build());
    for (categories, subcategories) in [(6, 4), (20, 10), (100, 20)] {
        let input = build_assessment(categories, subcategories);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{categories}x{subcategories}")),
            &input,
            |b, input| b.iter(|| engine.assess(black_box(input))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_weights, bench_learning, bench_assess);
criterion_main!(benches);
