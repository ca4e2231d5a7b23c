//! Benchmarks pour l'échelle de couleurs et le filtrage des collections

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;

use carto::colors::ColorScale;
use carto::types::{Feature, FeatureCollection, MetricKey};

/// Collection synthétique de la taille de la couche communes
fn build_collection(size: usize) -> FeatureCollection {
    let features = (0..size)
        .map(|i| {
            let mut properties = serde_json::Map::new();
            properties.insert(
                "pp_vacant_plus_2ans_25".to_string(),
                json!((i % 997) as f64 + 1.0),
            );
            Feature {
                code: format!("{:05}", i),
                nom: format!("Commune {}", i),
                geometry: None,
                properties,
            }
        })
        .collect();
    FeatureCollection::new(features)
}

fn bench_compute_scale(c: &mut Criterion) {
    let collection = build_collection(35_000);

    let mut group = c.benchmark_group("compute_scale");
    group.throughput(Throughput::Elements(35_000));
    group.bench_function("communes", |b| {
        b.iter(|| ColorScale::compute(black_box(&collection), MetricKey::VacantPlus2Ans))
    });
    group.finish();
}

fn bench_apply_colors(c: &mut Criterion) {
    let collection = build_collection(35_000);
    let scale = ColorScale::compute(&collection, MetricKey::VacantPlus2Ans);

    let mut group = c.benchmark_group("apply_colors");
    group.throughput(Throughput::Elements(35_000));
    group.bench_function("communes", |b| {
        b.iter_batched(
            || collection.clone(),
            |mut coll| scale.apply(&mut coll, MetricKey::VacantPlus2Ans),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_compute_scale, bench_apply_colors);
criterion_main!(benches);
