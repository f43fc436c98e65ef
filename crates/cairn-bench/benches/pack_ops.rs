//! Criterion micro-benchmarks for schema building and point packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cairn::{pack, PointSource, Schema};
use cairn_bench::{populated_table, reference_dims};

fn bench_schema_build(c: &mut Criterion) {
    let dims = reference_dims();
    c.bench_function("schema_build_16_dims", |b| {
        b.iter(|| Schema::from_dims(black_box(&dims)).unwrap());
    });
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for points in [1_000usize, 100_000] {
        let table = populated_table(points);
        let schema = Schema::from_dims(table.dims()).unwrap();
        group.throughput(criterion::Throughput::Bytes(
            (schema.row_stride() * points) as u64,
        ));
        group.bench_function(format!("{points}_points"), |b| {
            b.iter(|| pack(black_box(&table), black_box(&schema)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schema_build, bench_pack);
criterion_main!(benches);
