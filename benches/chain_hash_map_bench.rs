use chain_map::ChainHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

// The character-sum index spreads hex keys over roughly a thousand buckets
// at most, so sizes stay modest to keep chains in a realistic range.
const N: usize = 5_000;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64) -> (ChainHashMap<u64>, Vec<String>) {
    let mut m = ChainHashMap::new();
    let keys: Vec<String> = lcg(seed).take(N).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.put(k.as_str(), i as u64);
    }
    (m, keys)
}

fn bench_put_fresh(c: &mut Criterion) {
    c.bench_function("chain::put_fresh_5k", |b| {
        b.iter_batched(
            || {
                let keys: Vec<String> = lcg(1).take(N).map(key).collect();
                (ChainHashMap::<u64>::new(), keys)
            },
            |(mut m, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    m.put(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_update(c: &mut Criterion) {
    c.bench_function("chain::put_update_5k", |b| {
        b.iter_batched(
            || filled(2),
            |(mut m, keys)| {
                for (i, k) in keys.iter().enumerate() {
                    m.put(k.as_str(), i as u64 + 1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain::get_hit_1k_on_5k", |b| {
        let (m, keys) = filled(7);
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<&str> = (0..1_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % keys.len()].as_str()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain::get_miss_1k_on_5k", |b| {
        let (m, _keys) = filled(11);
        let misses: Vec<String> = lcg(0xdead_beef).take(1_000).map(key).collect();
        b.iter(|| {
            for k in &misses {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_remove_all(c: &mut Criterion) {
    c.bench_function("chain::remove_all_5k_with_shrinks", |b| {
        b.iter_batched(
            || filled(13),
            |(mut m, keys)| {
                for k in &keys {
                    let _ = m.remove(k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter(c: &mut Criterion) {
    c.bench_function("chain::iter_all_5k", |b| {
        let (m, _keys) = filled(999);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh, bench_put_update
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit, bench_get_miss, bench_remove_all, bench_iter
}
criterion_main!(benches_put, benches_ops);
