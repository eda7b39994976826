//! Kept in its own test binary: resetting the registries breaks identity for
//! every other test running in the same process.
use std::thread;

use hycanon::prelude::*;
use hycanon::registry;
use parking_lot::Mutex;

// Tests in this binary reset the registries; they must not interleave.
static RESET: Mutex<()> = Mutex::new(());

// Releases `value` on a thread with a small stack.
fn drop_on_small_stack<T: Send + 'static>(value: T) {
    thread::Builder::new()
        .stack_size(128 * 1024)
        .spawn(move || drop(value))
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn reset_drops_identity_but_keeps_equality() {
    let _guard = RESET.lock();
    let before = LabeledTree::node(1, [LabeledTree::leaf(2), LabeledTree::leaf(3)]);
    assert!(registry::stats().labeled_trees >= 1);

    registry::reset();
    assert_eq!(registry::stats().total(), 0);

    let after = LabeledTree::node(1, [LabeledTree::leaf(2), LabeledTree::leaf(3)]);
    assert!(!before.ptr_eq(&after));
    assert_eq!(before, after, "equality falls back to a structural comparison");
    assert_eq!(before.structural_hash(), after.structural_hash());

    let again = LabeledTree::node(1, [LabeledTree::leaf(2), LabeledTree::leaf(3)]);
    assert!(after.ptr_eq(&again));
    registry::check_integrity().unwrap();
}

fn chain(depth: usize) -> PlaneTree {
    let mut t = PlaneTree::leaf();
    for _ in 1..depth {
        t = PlaneTree::new([t]);
    }
    t
}

#[test]
fn deep_trees_release_iteratively_after_reset() {
    let _guard = RESET.lock();
    let tall = chain(200_000);
    assert_eq!(tall.height(), 200_000);

    let depth = 3_000;
    let labeled = labeled_tree(chain(depth), sequence(vec![7; depth])).unwrap();
    // Fill the immediate-subtree caches all the way down.
    let mut cursor = labeled.clone();
    while let Some(next) = cursor.immediate_subtree(0).cloned() {
        cursor = next;
    }
    assert_eq!(cursor, LabeledTree::leaf(7));
    drop(cursor);

    registry::reset();
    drop_on_small_stack(tall);
    drop_on_small_stack(labeled);
}
