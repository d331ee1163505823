use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rulelang_syntax::{parse_expression, parse_program};

fn bench_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_expression");

    let source = "u + v <= j - l < a log b";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("chained_compare", |b| {
        b.iter(|| parse_expression(black_box(source)).unwrap())
    });

    let source = "Point{x: 1, y: 2 ** 3, z: a if cond else b}";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("initializer", |b| {
        b.iter(|| parse_expression(black_box(source)).unwrap())
    });

    group.finish();
}

fn bench_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_program");

    let source = "a = 1\nb.field = a + 1\nf(a, b)\nc = Point{x: 1, y: 2}\n";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("small_statement_stream", |b| {
        b.iter(|| parse_program(black_box(source)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_expression, bench_program);
criterion_main!(benches);
