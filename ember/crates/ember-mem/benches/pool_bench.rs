//! Pool allocator benchmarks
//!
//! Run with: `cargo bench --bench pool_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ember_mem::{CompressedPointer, PoolAllocator, PoolConfig};

/// Allocation from fresh pools vs. from the free list
fn bench_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc");
    group.throughput(Throughput::Elements(1));

    for cells_per_pool in [1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::new("fresh", cells_per_pool),
            &cells_per_pool,
            |b, &cells_per_pool| {
                b.iter_batched(
                    || {
                        PoolAllocator::<u64>::new(PoolConfig {
                            cells_per_pool,
                            ..Default::default()
                        })
                        .unwrap()
                    },
                    |mut pools| {
                        for v in 0..256 {
                            black_box(pools.alloc(v));
                        }
                        pools
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.bench_function("reuse", |b| {
        let mut pools = PoolAllocator::<u64>::new(PoolConfig::default()).unwrap();
        let warm = pools.alloc(0);
        pools.free(warm);
        b.iter(|| {
            let cell = pools.alloc(black_box(1));
            pools.free(cell)
        })
    });

    group.finish();
}

/// Free everything then collect
fn bench_collect_empty(c: &mut Criterion) {
    c.bench_function("collect_empty_1k", |b| {
        b.iter_batched(
            || {
                let mut pools = PoolAllocator::<u64>::new(PoolConfig::default()).unwrap();
                let cells: Vec<_> = (0..1024).map(|v| pools.alloc(v)).collect();
                for cell in cells {
                    pools.free(cell);
                }
                pools
            },
            |mut pools| black_box(pools.collect_empty()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_codec(c: &mut Criterion) {
    let mut pools = PoolAllocator::<u64>::new(PoolConfig::default()).unwrap();
    let cell = pools.alloc(0);
    c.bench_function("compress_decompress", |b| {
        b.iter(|| CompressedPointer::compress(black_box(cell)).decompress())
    });
}

criterion_group!(benches, bench_alloc, bench_collect_empty, bench_codec);
criterion_main!(benches);
