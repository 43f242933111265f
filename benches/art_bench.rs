//! Simple performance bench over a few static scenarios, here to quickly
//! test for regressions.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use artrie::ArtTree;

const TREE_SIZES: [u64; 3] = [1 << 15, 1 << 18, 1 << 20];

fn gen_keys(l1_prefix: usize, l2_prefix: usize, suffix: usize) -> Vec<String> {
    let mut keys = Vec::new();
    let mut rng = StdRng::seed_from_u64(0xa7);
    let chars: Vec<char> = ('a'..='z').collect();
    for l1 in &chars {
        let level1_prefix = l1.to_string().repeat(l1_prefix);
        for l2 in &chars {
            let level2_prefix = l2.to_string().repeat(l2_prefix);
            let key_prefix = level1_prefix.clone() + &level2_prefix;
            for _ in 0..16 {
                let suffix: String = (0..suffix)
                    .map(|_| chars[rng.random_range(0..chars.len())])
                    .collect();
                keys.push(key_prefix.clone() + &suffix);
            }
        }
    }
    keys.shuffle(&mut rng);
    keys
}

pub fn rand_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_insert");
    group.throughput(Throughput::Elements(1));

    let keys = gen_keys(3, 2, 3);
    group.bench_function("string_keys", |b| {
        let mut tree = ArtTree::new();
        let mut rng = StdRng::seed_from_u64(0xb3);
        b.iter(|| {
            let key = &keys[rng.random_range(0..keys.len())];
            tree.insert(key, key.len());
        })
    });

    group.finish();
}

pub fn rand_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_remove");
    group.throughput(Throughput::Elements(1));

    let keys = gen_keys(3, 2, 3);
    group.bench_function("string_keys", |b| {
        let mut tree = ArtTree::new();
        let mut rng = StdRng::seed_from_u64(0xc1);
        for key in &keys {
            tree.insert(key, key.len());
        }
        b.iter(|| {
            let key = &keys[rng.random_range(0..keys.len())];
            criterion::black_box(tree.remove(key));
        })
    });

    group.finish();
}

pub fn rand_get(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("rand_get", size), &size, |b, size| {
            let mut tree = ArtTree::new();
            for i in 0..*size {
                tree.insert(i.to_be_bytes(), i);
            }
            let mut rng = StdRng::seed_from_u64(0xd9);
            b.iter(|| {
                let key = rng.random_range(0..*size);
                criterion::black_box(tree.get(key.to_be_bytes()));
            })
        });
    }
}

pub fn seq_insert(c: &mut Criterion) {
    c.bench_function("seq_insert", |b| {
        let mut tree = ArtTree::new();
        let mut key = 0u64;
        b.iter(|| {
            tree.insert(key.to_be_bytes(), key);
            key += 1;
        })
    });
}

pub fn full_iter(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("full_iter", size), &size, |b, size| {
            let mut tree = ArtTree::new();
            for i in 0..*size {
                tree.insert(i.to_be_bytes(), i);
            }
            b.iter(|| criterion::black_box(tree.iter().count()))
        });
    }
}

criterion_group!(rand_benches, rand_get, rand_insert, rand_remove);
criterion_group!(seq_benches, seq_insert, full_iter);
criterion_main!(seq_benches, rand_benches);
