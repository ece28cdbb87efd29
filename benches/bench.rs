use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use frostid::{
    AtomicSnowflakeGenerator, BasicSnowflakeGenerator, LockSnowflakeGenerator, SnowflakeGenerator,
    SnowflakeId, SystemClock, TimeSource,
};
use std::time::Instant;

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// One full sequence space: the number of IDs a generator can emit in a single
// millisecond tick, so the fixed-clock benchmarks never hit `Pending`.
const TOTAL_IDS: usize = 4096;

/// Benchmarks the hot path: a frozen clock, every poll `Ready`.
fn bench_generator<G, T>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: SnowflakeGenerator<T>,
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    let id = generator.next_id().expect("mock clock cannot move backwards");
                    black_box(id);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks generation against the real wall clock, including the
/// busy-wait when a millisecond's sequence space runs dry.
fn bench_generator_wallclock<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: SnowflakeGenerator<SystemClock>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = generator_factory();
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    let id = generator.next_id().expect("clock went backwards");
                    black_box(id);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let generator =
        BasicSnowflakeGenerator::new(1, SystemClock).expect("node ID is in range");
    let id = generator.next_id().expect("clock went backwards");

    let mut group = c.benchmark_group("decompose");
    group.throughput(Throughput::Elements(1));
    group.bench_function("default_epoch", |b| {
        b.iter(|| black_box(black_box(id).decompose()));
    });
    group.bench_function("raw_round_trip", |b| {
        b.iter(|| black_box(SnowflakeId::from_raw(black_box(id).to_raw())));
    });
    group.finish();
}

fn benches(c: &mut Criterion) {
    bench_generator(c, "basic/hot", || {
        BasicSnowflakeGenerator::with_epoch(1, 0, FixedMockTime { millis: 42 })
            .expect("node ID is in range")
    });
    bench_generator(c, "lock/hot", || {
        LockSnowflakeGenerator::with_epoch(1, 0, FixedMockTime { millis: 42 })
            .expect("node ID is in range")
    });
    bench_generator(c, "atomic/hot", || {
        AtomicSnowflakeGenerator::with_epoch(1, 0, FixedMockTime { millis: 42 })
            .expect("node ID is in range")
    });

    bench_generator_wallclock(c, "basic/wallclock", || {
        BasicSnowflakeGenerator::new(1, SystemClock).expect("node ID is in range")
    });

    bench_decompose(c);
}

criterion_group!(bench_group, benches);
criterion_main!(bench_group);
