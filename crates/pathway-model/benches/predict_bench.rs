use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pathway_core::IClassifier;
use pathway_model::artifact::native;
use test_fixtures::{reference_features, sample_forest, sample_logistic};

fn bench_single_vector(c: &mut Criterion) {
    let features = reference_features();
    let forest = sample_forest();
    let logistic = sample_logistic();

    c.bench_function("forest_predict_proba", |b| {
        b.iter(|| forest.predict_proba(black_box(features.as_slice())));
    });
    c.bench_function("logistic_predict_proba", |b| {
        b.iter(|| logistic.predict_proba(black_box(features.as_slice())));
    });
}

fn bench_native_decode(c: &mut Criterion) {
    let bytes = native::encode(&sample_forest()).unwrap();

    c.bench_function("native_decode_forest", |b| {
        b.iter(|| native::decode(black_box(&bytes)).unwrap());
    });
}

criterion_group!(benches, bench_single_vector, bench_native_decode);
criterion_main!(benches);
