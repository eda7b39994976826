#![cfg(feature = "serde")]

use hycanon::prelude::*;
use serde_json::json;

#[test]
fn sequences_are_flat_lists() {
    let s = seq![0, 4, 2];
    assert_eq!(serde_json::to_value(&s).unwrap(), json!([0, 4, 2]));
    let back: IntegerSequence = serde_json::from_value(json!([0, 4, 2])).unwrap();
    assert!(back.ptr_eq(&s));
}

#[test]
fn trees_are_nested_lists() {
    let t: PlaneTree = "((())())".parse().unwrap();
    assert_eq!(serde_json::to_value(&t).unwrap(), json!([[[]], []]));
    let back: PlaneTree = serde_json::from_str("[[[]], []]").unwrap();
    assert!(back.ptr_eq(&t));
}

#[test]
fn labeled_trees_validate_on_the_way_in() {
    let f = LabeledTree::node(0, [LabeledTree::node(1, [LabeledTree::leaf(2)]), LabeledTree::leaf(3)]);
    let value = serde_json::to_value(&f).unwrap();
    assert_eq!(value, json!([[[[]], []], [0, 1, 2, 3]]));
    let back: LabeledTree = serde_json::from_value(value).unwrap();
    assert!(back.ptr_eq(&f));

    let err = serde_json::from_value::<LabeledTree>(json!([[[[]], []], [0, 1, 2]])).unwrap_err();
    assert!(err.to_string().contains("4 node(s)"), "{err}");
    assert!(serde_json::from_value::<IntegerSequence>(json!([0, -1])).is_err());
}

#[test]
fn sequence_order_names() {
    let order: SequenceOrder = serde_json::from_value(json!("cantor-tupling")).unwrap();
    assert_eq!(order, SequenceOrder::CantorTupling);
    assert_eq!(serde_json::to_value(SequenceOrder::AdjustedSum).unwrap(), json!("adjusted-sum"));
}
