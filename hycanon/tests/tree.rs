use hycanon::prelude::*;
use hycanon::tree::count_trees_of_size;
use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn chain(depth: usize) -> PlaneTree {
    let mut t = PlaneTree::leaf();
    for _ in 1..depth {
        t = PlaneTree::new([t]);
    }
    t
}

fn random_shape(rng: &mut impl Rng, budget: usize) -> Shape {
    if budget == 0 || rng.random_bool(0.3) {
        return Shape::leaf();
    }
    let degree = rng.random_range(1..=3);
    Shape((0..degree).map(|_| random_shape(rng, budget / 2)).collect())
}

#[test]
fn chain_of_three() {
    let t = chain(3);
    assert_eq!(t.size(), 3);
    assert_eq!(t.degree(), 1);
    assert_eq!(t.height(), 3);
    assert_eq!(t.internal_node_count(), 2);
    assert_eq!(t.dyck_word(), "((()))");
    assert_eq!(t.to_string(), "((()))");
    assert_eq!(t.ahu_integer(), BigUint::from(56u32));
}

#[test]
fn leaf_properties() {
    let leaf = PlaneTree::leaf();
    assert!(leaf.is_leaf());
    assert_eq!(leaf.size(), 1);
    assert_eq!(leaf.height(), 1);
    assert_eq!(leaf.dyck_word(), "()");
    assert!(leaf.ptr_eq(&PlaneTree::default()));
    assert!(leaf.child(0).is_none());
}

#[test]
fn dyck_words_parse_back_to_the_same_instance() {
    let t = PlaneTree::new([chain(2), PlaneTree::leaf(), chain(3)]);
    let parsed: PlaneTree = t.dyck_word().parse().unwrap();
    assert!(parsed.ptr_eq(&t));
    assert_eq!(PlaneTree::from_shape(&t.to_shape()), t);
    assert!(t.is_structurally_equivalent(&parsed));
}

#[test]
fn invalid_dyck_words_are_rejected() {
    assert_eq!(
        PlaneTree::from_dyck_word("(()").unwrap_err(),
        Error::InvalidDyckWord { position: 3 }
    );
    assert_eq!(
        PlaneTree::from_dyck_word("())").unwrap_err(),
        Error::InvalidDyckWord { position: 2 }
    );
    assert_eq!(
        PlaneTree::from_dyck_word("()()").unwrap_err(),
        Error::InvalidDyckWord { position: 2 }
    );
    assert_eq!(
        PlaneTree::from_dyck_word("(x)").unwrap_err(),
        Error::InvalidDyckWord { position: 1 }
    );
    assert!(PlaneTree::from_dyck_word("").is_err());
}

#[test]
fn paths_and_subtrees() {
    let t = PlaneTree::new([chain(2), PlaneTree::leaf()]);
    assert_eq!(t.subtree_by_path(&[]).unwrap(), t);
    assert_eq!(t.subtree_by_path(&[0, 0]).unwrap(), PlaneTree::leaf());
    assert_eq!(
        t.subtree_by_path(&[0, 1]).unwrap_err(),
        Error::InvalidPath { path: vec![0, 1], depth: 1 }
    );

    let words: Vec<String> = t.iterate_subtrees().map(|s| s.dyck_word()).collect();
    assert_eq!(words, ["((())())", "(())", "()", "()"]);
    assert_eq!(t.iterate_subtrees().count(), t.size());
}

#[test]
fn dyck_order_prefix() {
    let words = [
        "()",
        "(())",
        "((()))",
        "(()())",
        "(((())))",
        "((()()))",
        "((())())",
        "(()(()))",
        "(()()())",
    ];
    let order = DyckWordOrder;
    for (rank, word) in words.iter().enumerate() {
        let t: PlaneTree = word.parse().unwrap();
        assert_eq!(order.rank(&t).unwrap(), BigUint::from(rank), "rank of {word}");
        assert_eq!(order.unrank(&BigUint::from(rank)).unwrap(), t, "unrank of {rank}");
    }

    let walked: Vec<String> = Ascending::from_least(&order)
        .take(words.len())
        .map(|t| t.dyck_word())
        .collect();
    assert_eq!(walked, words);
}

#[test]
fn dyck_order_round_trip() {
    let order = DyckWordOrder;
    let mut previous = order.least_element();
    for n in 1u64..1500 {
        let t = order.unrank(&BigUint::from(n)).unwrap();
        assert_eq!(order.rank(&t).unwrap(), BigUint::from(n));
        assert!(previous < t, "{previous} < {t}");
        assert_eq!(order.successor(&previous).unwrap(), t);
        previous = t;
    }

    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    for _ in 0..100 {
        let t = PlaneTree::from_shape(&random_shape(&mut rng, 24));
        let rank = order.rank(&t).unwrap();
        assert_eq!(order.unrank(&rank).unwrap(), t);
    }
}

#[test]
fn trees_of_size_counts() {
    let counts: Vec<usize> = (1..=7).map(|n| PlaneTree::trees_of_size(n).count()).collect();
    assert_eq!(counts, [1, 1, 2, 5, 14, 42, 132]);
    for n in 1..=7u64 {
        assert_eq!(count_trees_of_size(n), BigUint::from(counts[n as usize - 1]));
        assert!(PlaneTree::trees_of_size(n).all(|t| t.size() == n as usize));
    }
    assert_eq!(count_trees_of_size(0), BigUint::default());
}

#[test]
fn deep_trees_do_not_overflow_the_stack() {
    let depth = 20_000;
    let t = chain(depth);
    assert_eq!(t.size(), depth);
    assert_eq!(t.height(), depth);
    let word = t.dyck_word();
    assert_eq!(word.len(), 2 * depth);
    let parsed = PlaneTree::from_dyck_word(&word).unwrap();
    assert!(parsed.ptr_eq(&t));
    assert!(t.is_structurally_equivalent(&parsed));
}
