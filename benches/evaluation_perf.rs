
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use appetite::allocation;
use appetite::snapshot::{self, FirmSnapshot};

use fixtures::{LARGE, MEDIUM, SMALL, build_scenario, equal_percentages};

// ── Group 1: validate — allocation check scaling ─────────────────────────────

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for &n in &[4usize, 100, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let pcts = equal_percentages(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pcts, |b, p| {
            b.iter(|| allocation::validate(std::hint::black_box(p)))
        });
    }
    group.finish();
}

// ── Group 2: evaluate — full pipeline for one snapshot ───────────────────────

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for (name, scenario) in [("small", &SMALL), ("medium", &MEDIUM), ("large", &LARGE)] {
        group.throughput(Throughput::Elements(scenario.units as u64));
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter_batched(
                || build_scenario(scenario, 42),
                |config| FirmSnapshot::from_config(&config).map(|s| s.evaluate()),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

// ── Group 3: batch — parallel independent snapshots ──────────────────────────

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    for &count in &[10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(count as u64));
        let configs: Vec<_> = (0..count as u64).map(|seed| build_scenario(&MEDIUM, seed)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &configs, |b, cs| {
            b.iter(|| snapshot::evaluate_batch(cs))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate, bench_evaluate, bench_batch);
criterion_main!(benches);
