use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hycanon::prelude::*;
use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_sequences(rng: &mut impl Rng, count: usize) -> Vec<IntegerSequence> {
    (0..count)
        .map(|_| {
            let len = rng.random_range(0..16);
            (0..len).map(|_| rng.random_range(0..64u64)).collect()
        })
        .collect()
}

fn random_labeled(rng: &mut impl Rng, budget: usize) -> LabeledTree {
    let label = rng.random_range(0..8u64);
    if budget == 0 || rng.random_bool(0.3) {
        return LabeledTree::leaf(label);
    }
    let degree = rng.random_range(1..=3);
    let children: Vec<LabeledTree> = (0..degree).map(|_| random_labeled(rng, budget / 2)).collect();
    LabeledTree::node(label, children)
}

fn bench_adjusted_sum(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let sequences = random_sequences(&mut rng, 256);
    let ranks: Vec<BigUint> = sequences
        .iter()
        .map(|s| AdjustedSumOrder.rank(s).unwrap())
        .collect();

    c.bench_function("adjusted_sum_rank", |b| {
        b.iter(|| {
            for s in &sequences {
                black_box(AdjustedSumOrder.rank(black_box(s)).unwrap());
            }
        })
    });
    c.bench_function("adjusted_sum_unrank", |b| {
        b.iter(|| {
            for n in &ranks {
                black_box(AdjustedSumOrder.unrank(black_box(n)).unwrap());
            }
        })
    });
}

fn bench_dyck(c: &mut Criterion) {
    let trees: Vec<PlaneTree> = PlaneTree::trees_of_size(9).collect();
    c.bench_function("dyck_rank_size_9", |b| {
        b.iter(|| {
            for t in &trees {
                black_box(DyckWordOrder.rank(black_box(t)).unwrap());
            }
        })
    });
}

fn bench_labeled(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let trees: Vec<LabeledTree> = (0..64).map(|_| random_labeled(&mut rng, 6)).collect();
    let recursive = RecursiveSequenceOrder::canonical();
    // Deep trees may overflow the recursive order; keep the ones it can rank.
    let rankable: Vec<&LabeledTree> = trees.iter().filter(|t| recursive.rank(t).is_ok()).collect();

    c.bench_function("recursive_sequence_rank", |b| {
        b.iter(|| {
            for t in &rankable {
                black_box(recursive.rank(black_box(t)).unwrap());
            }
        })
    });
    c.bench_function("cantor_pairing_rank", |b| {
        b.iter(|| {
            for t in &trees {
                black_box(CantorPairingOrder.rank(black_box(t)).unwrap());
            }
        })
    });
    c.bench_function("canonical_form", |b| {
        b.iter(|| {
            for t in &trees {
                black_box(black_box(t).canonical_form());
            }
        })
    });
}

fn bench_substitution(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let trees: Vec<LabeledTree> = (0..64).map(|_| random_labeled(&mut rng, 8)).collect();
    let map = Substitution::from_pairs(
        (0..8u64).map(|label| (LabeledTree::leaf(label), LabeledTree::node(label, [LabeledTree::leaf(0)]))),
    )
    .unwrap();

    c.bench_function("substitute_leaves", |b| {
        b.iter(|| {
            for t in &trees {
                black_box(map.apply(black_box(t)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_adjusted_sum,
    bench_dyck,
    bench_labeled,
    bench_substitution
);
criterion_main!(benches);
