use core::hint::black_box;

use criterion::BatchSize;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use packed_map::PackedMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const SIZE: usize = 10_000;

fn keys() -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0xDECAF);
    (0..SIZE).map(|_| rng.random::<u64>()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("packed_map", |b| {
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut map = PackedMap::new();
                for key in keys {
                    map.insert(black_box(key), key);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("hashbrown", |b| {
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut map = hashbrown::HashMap::new();
                for key in keys {
                    map.insert(black_box(key), key);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("std", |b| {
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut map = std::collections::HashMap::new();
                for key in keys {
                    map.insert(black_box(key), key);
                }
                map
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let keys = keys();
    let mut probes = keys.clone();
    probes.shuffle(&mut SmallRng::seed_from_u64(0xC0FFEE));

    let mut packed = PackedMap::with_capacity(SIZE);
    let mut brown = hashbrown::HashMap::with_capacity(SIZE);
    let mut std_map = std::collections::HashMap::with_capacity(SIZE);
    for key in &keys {
        packed.insert(*key, *key);
        brown.insert(*key, *key);
        std_map.insert(*key, *key);
    }

    let mut group = c.benchmark_group("lookup_hit");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("packed_map", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for key in &probes {
                if packed.get(black_box(key)).is_some() {
                    found += 1;
                }
            }
            found
        })
    });

    group.bench_function("hashbrown", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for key in &probes {
                if brown.get(black_box(key)).is_some() {
                    found += 1;
                }
            }
            found
        })
    });

    group.bench_function("std", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for key in &probes {
                if std_map.get(black_box(key)).is_some() {
                    found += 1;
                }
            }
            found
        })
    });

    group.finish();
}

fn bench_batch_traversal(c: &mut Criterion) {
    let keys = keys();
    let mut map = PackedMap::with_capacity(SIZE);
    for key in &keys {
        map.insert(*key, 1u64);
    }

    let mut group = c.benchmark_group("traversal");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("sequential_for_each", |b| {
        b.iter(|| {
            let mut total = 0u64;
            map.for_each_value(|value| total += *value);
            total
        })
    });

    group.bench_function("batched_sections", |b| {
        let sections = map.batch_count(1024);
        b.iter(|| {
            let mut total = 0u64;
            for section in 0..sections {
                map.batch_for_each(section, sections, |value| total += *value);
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_batch_traversal);
criterion_main!(benches);
