use hycanon::labeled::{count_canonical_labeled_trees, count_labeled_trees};
use hycanon::prelude::*;
use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

// Helpers
fn leaf(label: u64) -> LabeledTree {
    LabeledTree::leaf(label)
}

fn node<const N: usize>(label: u64, children: [LabeledTree; N]) -> LabeledTree {
    LabeledTree::node(label, children)
}

fn chain3() -> PlaneTree {
    "((()))".parse().unwrap()
}

fn random_labeled(rng: &mut impl Rng, budget: usize, max_label: u64) -> LabeledTree {
    let label = rng.random_range(0..=max_label);
    if budget == 0 || rng.random_bool(0.4) {
        return leaf(label);
    }
    let degree = rng.random_range(1..=3);
    LabeledTree::node(
        label,
        (0..degree).map(|_| random_labeled(rng, budget / 2, max_label)).collect::<Vec<_>>(),
    )
}

#[test]
fn construction_checks_lengths_and_signs() {
    let err = LabeledTree::new(chain3(), seq![0, 1]).unwrap_err();
    assert_eq!(err, Error::LengthMismatch { tree_size: 3, sequence_length: 2 });
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = LabeledTree::try_from_signed(chain3(), &[0, -2, 1]).unwrap_err();
    assert_eq!(err, Error::NegativeElement { index: 1, value: -2 });

    let t = LabeledTree::try_from_signed(chain3(), &[5, 5, 5]).unwrap();
    assert_eq!(t.sequence(), &seq![5, 5, 5]);
}

#[test]
fn canonical_form_relabels_by_first_appearance() {
    let t = labeled_tree(chain3(), seq![5, 5, 5]).unwrap();
    assert!(!t.is_canonical());
    let canonical = t.canonical_form();
    assert_eq!(canonical.sequence(), &seq![0, 0, 0]);
    assert!(canonical.tree().ptr_eq(t.tree()), "the shape is kept");
    assert!(canonical.is_canonical());
    assert!(canonical.canonical_form().ptr_eq(&canonical));
    assert!(t.is_canonically_equivalent(&labeled_tree(chain3(), seq![2, 2, 2]).unwrap()));
    assert!(!t.is_canonically_equivalent(&labeled_tree(chain3(), seq![2, 2, 3]).unwrap()));
}

#[test]
fn components_and_display() {
    // 0(1(2), 3)
    let f = node(0, [node(1, [leaf(2)]), leaf(3)]);
    assert_eq!(f.to_string(), "0(1(2), 3)");
    assert_eq!(format!("{f:?}"), "LabeledTree(0(1(2), 3))");
    assert_eq!(f.main_element(), NaturalIndex::new(0));
    assert_eq!(f.label(2), Some(NaturalIndex::new(2)));
    assert_eq!(f.label(4), None);
    assert_eq!(f.degree(), 2);
    assert_eq!(f.tree_size(), 4);
    assert_eq!(f.formula_degree(), 2);
    assert!(!f.is_leaf());
    assert_eq!(leaf(7).to_string(), "7");
}

#[test]
fn independent_constructions_are_identical() {
    let f = node(0, [node(1, [leaf(2)]), leaf(3)]);
    let g = labeled_tree("((())())".parse().unwrap(), seq![0, 1, 2, 3]).unwrap();
    let h = LabeledTree::from_label_shape(&LabelShape::node(
        0,
        [LabelShape::node(1, [LabelShape::leaf(2)]), LabelShape::leaf(3)],
    ));
    assert!(f.ptr_eq(&g));
    assert!(f.ptr_eq(&h));
    assert_eq!(
        h.to_label_shape(),
        LabelShape::node(0, [LabelShape::node(1, [LabelShape::leaf(2)]), LabelShape::leaf(3)])
    );
    assert!(f.is_structurally_equivalent(&g));
}

#[test]
fn immediate_subtrees_and_paths() {
    let f = node(0, [node(1, [leaf(2)]), leaf(3)]);
    let subtrees = f.immediate_subtrees();
    assert_eq!(subtrees.len(), 2);
    assert!(subtrees[0].ptr_eq(&node(1, [leaf(2)])));
    assert!(subtrees[1].ptr_eq(&leaf(3)));
    assert!(f.immediate_subtrees().as_ptr() == subtrees.as_ptr(), "computed once");

    assert_eq!(f.subtree_by_path(&[0, 0]).unwrap(), leaf(2));
    assert_eq!(
        f.subtree_by_path(&[1, 0]).unwrap_err(),
        Error::InvalidPath { path: vec![1, 0], depth: 1 }
    );

    let all: Vec<String> = f.iterate_subtrees().map(|s| s.to_string()).collect();
    assert_eq!(all, ["0(1(2), 3)", "1(2)", "2", "3"]);
    assert!(f.contains_subtree(&leaf(2)));
    assert!(!f.contains_subtree(&leaf(4)));
    assert!(node(1, [leaf(2)]).is_subtree_of(&f));
}

#[test]
fn abstract_set_view() {
    let set = node(9, [leaf(1), leaf(2), leaf(1)]);
    let view = set.as_abstract_set();
    assert_eq!(view.len(), 3);
    assert!(view.contains(&leaf(2)));
    assert!(!view.contains(&leaf(9)));
    assert!(!view.is_element_unique());
    assert!(leaf(0).as_abstract_set().is_empty());
}

#[test]
fn abstract_map_view() {
    // m(P(k1, k2), I(v1, v2))
    let (k1, k2, v1, v2) = (leaf(10), node(11, [leaf(12)]), leaf(20), leaf(21));
    let m = node(
        0,
        [
            LabeledTree::node(1, [k1.clone(), k2.clone()]),
            LabeledTree::node(2, [v1.clone(), v2.clone()]),
        ],
    );
    assert!(m.is_abstract_map());
    let map = m.as_abstract_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k2), Some(&v2));
    assert_eq!(map.get(&v1), None);
    assert_eq!(map.keys(), &[k1.clone(), k2.clone()]);
    assert_eq!(map.values(), &[v1.clone(), v2.clone()]);
    assert_eq!(map.iter().count(), 2);

    let repeated_key = node(0, [node(1, [k1.clone(), k1.clone()]), node(2, [v1.clone(), v2.clone()])]);
    assert!(!repeated_key.is_abstract_map());
    let uneven = node(0, [node(1, [k1.clone()]), node(2, [v1.clone(), v2.clone()])]);
    assert!(!uneven.is_abstract_map());
    assert!(matches!(
        leaf(0).as_abstract_map().unwrap_err(),
        Error::NotAnAbstractMap { .. }
    ));
}

#[test]
fn inference_rule_view() {
    let rule = node(0, [node(1, [leaf(5)]), node(2, [leaf(5), leaf(6)]), leaf(6)]);
    assert!(rule.is_inference_rule());
    let view = rule.as_inference_rule().unwrap();
    assert_eq!(view.variables().len(), 1);
    assert_eq!(view.premises().len(), 2);
    assert_eq!(view.conclusion, leaf(6));
    assert!(matches!(
        node(0, [leaf(1)]).as_inference_rule().unwrap_err(),
        Error::NotAnInferenceRule { .. }
    ));
}

#[test]
fn recursive_sequence_order_prefix() {
    let order = RecursiveSequenceOrder::canonical();
    let expected = ["0", "1", "0(0)", "2", "1(0)", "0(1)", "0(0, 0)"];
    for (rank, shown) in expected.iter().enumerate() {
        let t = order.unrank(&BigUint::from(rank)).unwrap();
        assert_eq!(t.to_string(), *shown, "unrank of {rank}");
        assert_eq!(order.rank(&t).unwrap(), BigUint::from(rank));
    }
    assert_eq!(order.least_element(), leaf(0));
    assert!(order.relates(&leaf(1), &node(0, [leaf(0)])).unwrap());
}

#[test]
fn recursive_sequence_order_round_trip() {
    let order = RecursiveSequenceOrder::canonical();
    let mut current = order.least_element();
    for n in 0u64..300 {
        assert_eq!(order.rank(&current).unwrap(), BigUint::from(n), "rank of {current}");
        current = order.successor(&current).unwrap();
    }

    let refined = RecursiveSequenceOrder::new(RefinedGodelOrder);
    for n in 0u64..200 {
        let t = refined.unrank(&BigUint::from(n)).unwrap();
        assert_eq!(refined.rank(&t).unwrap(), BigUint::from(n), "round trip of {t}");
    }
}

#[test]
fn recursive_sequence_order_overflows_cleanly() {
    // Nesting chains makes ranks grow fast; at some depth a subtree rank no
    // longer fits a sequence element.
    let order = RecursiveSequenceOrder::canonical();
    let mut t = leaf(3);
    let mut saw_overflow = false;
    for _ in 0..16 {
        t = node(3, [t]);
        match order.rank(&t) {
            Ok(rank) => assert_eq!(order.unrank(&rank).unwrap(), t),
            Err(err) => {
                assert!(err.is_rank_overflow(), "unexpected {err}");
                saw_overflow = true;
                break;
            }
        }
    }
    assert!(saw_overflow);
}

#[test]
fn cantor_pairing_order_round_trip() {
    let order = CantorPairingOrder;
    assert_eq!(order.rank(&leaf(0)).unwrap(), BigUint::default());
    for n in 0u64..300 {
        let t = order.unrank(&BigUint::from(n)).unwrap();
        assert_eq!(order.rank(&t).unwrap(), BigUint::from(n), "round trip of {t}");
    }

    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    for _ in 0..100 {
        let t = random_labeled(&mut rng, 8, 6);
        let rank = order.rank(&t).unwrap();
        assert_eq!(order.unrank(&rank).unwrap(), t);
        let (shape, labels) = CantorPairingOrder::split(&t).unwrap();
        assert_eq!(DyckWordOrder.unrank(&shape).unwrap(), *t.tree());
        assert_eq!(
            AdjustedSumOrder::unrank_within_length(&labels, t.tree_size()).unwrap(),
            *t.sequence()
        );
    }
}

#[test]
fn counting() {
    assert_eq!(count_labeled_trees(0, 3), BigUint::default());
    assert_eq!(count_labeled_trees(1, 3), BigUint::from(4u32));
    // Catalan(2) * 2^3
    assert_eq!(count_labeled_trees(3, 1), BigUint::from(16u32));
    // Catalan(2) * Bell(3)
    assert_eq!(count_canonical_labeled_trees(3), BigUint::from(10u32));

    let canonical_of_size_3 = PlaneTree::trees_of_size(3)
        .flat_map(|tree| {
            [seq![0, 0, 0], seq![0, 0, 1], seq![0, 1, 0], seq![0, 1, 1], seq![0, 1, 2]]
                .map(move |labels| labeled_tree(tree.clone(), labels).unwrap())
        })
        .filter(LabeledTree::is_canonical)
        .count();
    assert_eq!(BigUint::from(canonical_of_size_3), count_canonical_labeled_trees(3));
}
