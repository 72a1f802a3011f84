use bplustree_set::BPlusTreeSet;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

const TEST_SIZE: i64 = 10_000;

fn shuffled_keys() -> Vec<i64> {
    let mut keys: Vec<i64> = (0..TEST_SIZE).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(42));
    keys
}

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let keys = shuffled_keys();

    for order in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("our_tree", order), &order, |b, &order| {
            b.iter(|| {
                let mut tree = BPlusTreeSet::new(order).unwrap();
                for key in &keys {
                    tree.add(black_box(*key)).unwrap();
                }
                black_box(tree.size())
            })
        });
    }

    group.bench_function("std_btreeset", |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(black_box(*key));
            }
            black_box(set.len())
        })
    });

    group.finish();
}

fn member_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("member");
    let keys = shuffled_keys();
    let std_set: BTreeSet<i64> = keys.iter().copied().collect();

    for order in [4, 16, 64] {
        let tree = BPlusTreeSet::from_keys(order, keys.iter().copied()).unwrap();
        group.bench_with_input(BenchmarkId::new("our_tree", order), &tree, |b, tree| {
            b.iter(|| {
                let mut hits = 0;
                for probe in (0..TEST_SIZE * 2).step_by(7) {
                    if tree.member(black_box(&probe)) {
                        hits += 1;
                    }
                }
                hits
            })
        });
    }

    group.bench_function("std_btreeset", |b| {
        b.iter(|| {
            let mut hits = 0;
            for probe in (0..TEST_SIZE * 2).step_by(7) {
                if std_set.contains(black_box(&probe)) {
                    hits += 1;
                }
            }
            hits
        })
    });

    group.finish();
}

criterion_group!(benches, insert_benchmark, member_benchmark);
criterion_main!(benches);
