use chain_table::{HashEngine, TableConfig};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(capacity: usize, seed: u64, n: usize) -> (HashEngine, Vec<String>) {
    let mut m = HashEngine::new(capacity).unwrap();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for k in &keys {
        m.insert(k, k).unwrap();
    }
    (m, keys)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("engine::insert_fresh_100k_cap_64k", |b| {
        b.iter_batched(
            || HashEngine::new(1 << 16).unwrap(),
            |mut m| {
                for x in lcg(1).take(100_000) {
                    let k = key(x);
                    m.insert(&k, &k).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("engine::insert_fresh_100k_auto_resize", |b| {
        b.iter_batched(
            || {
                let cfg = TableConfig::new().with_capacity(16).with_max_load_factor(0.75);
                HashEngine::with_config(cfg).unwrap()
            },
            |mut m| {
                for x in lcg(1).take(100_000) {
                    let k = key(x);
                    m.insert(&k, &k).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_retrieve(c: &mut Criterion) {
    c.bench_function("engine::retrieve_hit_10k_on_100k", |b| {
        let (m, keys) = filled(1 << 16, 7, 100_000);
        // Precompute 10k random query keys using LCG
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<&String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                &keys[(s as usize) % n]
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.retrieve(k));
            }
        })
    });

    c.bench_function("engine::retrieve_miss_10k_on_100k", |b| {
        let (m, _) = filled(1 << 16, 11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.retrieve(&k));
            }
        })
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("engine::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(1 << 16, 5, 110_000);
                let n = keys.len();
                let mut s = 0x9e3779b97f4a7c15u64;
                let to_remove: Vec<String> = (0..10_000)
                    .map(|_| {
                        s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                        keys[(s as usize) % n].clone()
                    })
                    .collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in to_remove {
                    black_box(m.remove(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_resize(c: &mut Criterion) {
    c.bench_function("engine::resize_100k_from_32k", |b| {
        b.iter_batched(
            || filled(1 << 15, 42, 100_000).0,
            |m| black_box(m.resize()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_retrieve,
              bench_remove_random_10k,
              bench_resize
}
criterion_main!(benches_insert, benches_ops);
