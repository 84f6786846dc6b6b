//! Front-end performance benchmarks

use bsvsyn_frontend::{parse, tokenize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("counter", include_str!("../demos/counter.bsv")),
        ("fifo", include_str!("../demos/fifo.bsv")),
    ]
}

fn benchmark_lexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexing");

    for (name, source) in sources() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, source| {
            b.iter(|| black_box(tokenize(source).len()));
        });
    }
    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, source) in sources() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, source| {
            b.iter(|| {
                let (tree, diagnostics) = parse(source);
                black_box((tree, diagnostics.len()))
            });
        });
    }
    group.finish();
}

fn benchmark_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    group.measurement_time(Duration::from_secs(10));

    let counter = include_str!("../demos/counter.bsv");
    for copies in [1, 10, 100] {
        let source = counter.repeat(copies);
        group.bench_with_input(BenchmarkId::new("packages", copies), &source, |b, source| {
            b.iter(|| black_box(parse(source).1.len()));
        });
    }

    // Recovery path: every rule is left open
    let broken = "module mkM(); rule r; x <= (a + ;\n".repeat(100);
    group.bench_function("recovery", |b| {
        b.iter(|| black_box(parse(&broken).1.len()));
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_lexing,
    benchmark_parsing,
    benchmark_scaling
);
criterion_main!(benches);
