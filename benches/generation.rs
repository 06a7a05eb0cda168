//! Benchmarks for Apiary dataset generation

use apiary::{generate_dataset, GeneratorConfig, HiveDataGenerator, TimeWindow, Topology};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn window(days: u32) -> TimeWindow {
    let end = NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    TimeWindow::ending_at(end, days)
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let fleet = Topology::fleet();
    let thirty = window(30);

    group.throughput(Throughput::Elements((thirty.len() * fleet.len()) as u64));

    group.bench_function("lazy_30_days", |b| {
        b.iter(|| {
            let generator = HiveDataGenerator::with_rng(&fleet, thirty, StdRng::seed_from_u64(42));
            let total: f64 = generator.map(|r| r.hourly_production).sum();
            black_box(total);
        })
    });

    group.bench_function("dataset_30_days", |b| {
        let config = GeneratorConfig::new().with_end(thirty.end).with_seed(42);
        b.iter(|| {
            let dataset = generate_dataset(&config, &fleet).unwrap();
            black_box(dataset.len());
        })
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let fleet = Topology::fleet();
    let config = GeneratorConfig::new().with_end(window(30).end).with_seed(42);
    let dataset = generate_dataset(&config, &fleet).unwrap();

    group.throughput(Throughput::Elements(dataset.len() as u64));

    group.bench_function("json_pretty", |b| {
        b.iter(|| {
            let text = serde_json::to_string_pretty(dataset.readings()).unwrap();
            black_box(text.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_serialization);
criterion_main!(benches);
