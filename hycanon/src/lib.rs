//! Hycanon: canonical combinatorial encodings for formal languages.
//!
//! Formulas are modeled as labeled plane trees built from two orthogonal
//! parts: an unlabeled ordered tree shape ([`tree::PlaneTree`]) and a
//! sequence of natural numbers labeling its nodes in pre-order
//! ([`sequence::IntegerSequence`]). This crate provides
//!
//!  - total orders over sequences, trees and labeled trees, with `rank`,
//!    `unrank` and `successor` wherever the order is isomorphic to (ℕ, <);
//!  - hash-consing: one live instance per distinct structural value, so that
//!    equality of independently built values is a pointer comparison;
//!  - canonical forms (restricted-growth relabeling), semantic views (set,
//!    map, inference rule) and substitution.
//!
//! Identity
//!  - Every value is interned at construction time by a process-wide
//!    registry guarded by `parking_lot` locks; see [`registry`].
//!  - Values are immutable. Handles are reference counted and cheap to clone.
//!
//! Errors
//!  - Construction never coerces bad input: length mismatches and negative
//!    labels surface as [`error::Error`] values. Rank requests outside an
//!    order's image are domain errors.
//!
//! Example
//! ```
//! use hycanon::prelude::*;
//!
//! // 0(1(2), 3)
//! let f = LabeledTree::node(0, [
//!     LabeledTree::node(1, [LabeledTree::leaf(2)]),
//!     LabeledTree::leaf(3),
//! ]);
//! assert_eq!(f.to_string(), "0(1(2), 3)");
//! assert_eq!(f.tree().dyck_word(), "((())())");
//!
//! // Built independently, identical content: same instance.
//! let tree: PlaneTree = "((())())".parse().unwrap();
//! let g = labeled_tree(tree, sequence([0, 1, 2, 3])).unwrap();
//! assert!(f.ptr_eq(&g));
//!
//! // Canonical order round trip.
//! let order = RecursiveSequenceOrder::canonical();
//! let rank = order.rank(&f).unwrap();
//! assert_eq!(order.unrank(&rank).unwrap(), f);
//! ```

/// Memoized combinatorial counts, primes and Cantor pairing.
pub mod combinatorics;
/// Error type shared by the whole crate.
pub mod error;
/// Natural-number labels.
pub mod index;
/// Labeled plane trees, their canonical form, views and orders.
pub mod labeled;
/// The order protocol implemented by every order.
pub mod order;
/// Process-wide hash-consing registries.
pub mod registry;
/// Integer sequences and their orders.
pub mod sequence;
/// Map-based rewriting of labeled trees.
pub mod substitution;
/// Unlabeled plane trees and the Dyck word order.
pub mod tree;

#[cfg(feature = "serde")]
mod serde_impls;

use error::Result;
use labeled::LabeledTree;
use sequence::IntegerSequence;
use tree::PlaneTree;

/// Build (or fetch) the sequence with these elements.
pub fn sequence(elements: impl IntoIterator<Item = u64>) -> IntegerSequence {
    IntegerSequence::new(elements)
}

/// Build (or fetch) the plane tree with these children.
pub fn tree(children: impl IntoIterator<Item = PlaneTree>) -> PlaneTree {
    PlaneTree::new(children)
}

/// Pair a shape with its labels; fails unless there is one label per node.
pub fn labeled_tree(tree: PlaneTree, sequence: IntegerSequence) -> Result<LabeledTree> {
    LabeledTree::new(tree, sequence)
}

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - The three structural types and their free-function constructors
    //! - The order protocol and every concrete order
    //! - Substitution
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::index::NaturalIndex;
    pub use crate::labeled::{
        AbstractInferenceRule, AbstractMap, AbstractSet, CantorPairingOrder, LabelShape,
        LabeledTree, RecursiveSequenceOrder,
    };
    pub use crate::order::{Ascending, OrderRelation};
    pub use crate::sequence::{
        AdjustedSumOrder, CantorTuplingOrder, FixedWidthSentinelOrder, GodelOrder,
        IntegerSequence, LengthFirstLexicographicOrder, LexicographicOrder, RefinedGodelOrder,
        SequenceOrder, SumFirstLexicographicOrder,
    };
    pub use crate::substitution::Substitution;
    pub use crate::tree::{DyckWordOrder, PlaneTree, Shape};
    pub use crate::{labeled_tree, seq, sequence, tree};
}
