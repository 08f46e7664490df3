use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use daware::prelude::*;
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;

fn random_sentinel_string(rng: &mut impl Rng, n: usize, alphabet: u8) -> Vec<u8> {
    let mut s: Vec<u8> = (0..n - 1).map(|_| 1 + rng.random_range(0..alphabet)).collect();
    s.push(0);
    s
}

fn bench_1m_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Byte String");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(90));

    let mut rng = rand::rng();
    let count = 1_000_000;
    let s = random_sentinel_string(&mut rng, count, 64);
    group.throughput(Throughput::Bytes(count as u64));

    group.bench_function("daware", |b| {
        b.iter_batched(
            || s.clone(),
            |data| sort_suffixes(black_box(&data)).unwrap(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_1m_bytes);
criterion_main!(benches);
