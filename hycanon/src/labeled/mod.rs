//! Labeled plane trees: the formulas of a formal language.
//!
//! A [`LabeledTree`] pairs a [`PlaneTree`] with an [`IntegerSequence`] of the
//! same length. The first element labels the root; the following elements
//! label the remaining nodes in depth-first pre-order. For instance the
//! shape `((())())` with sequence `(0, 1, 2, 3)` is the formula `0(1(2), 3)`.
//!
//! Canonical form
//! - A labeled tree is canonical when its sequence is a restricted-growth
//!   function. [`LabeledTree::canonical_form`] relabels by first appearance, so
//!   two formulas that repeat their labels with the same pattern share one
//!   canonical form.
//!
//! Views
//! - Degree-2 trees may be read as maps, degree-3 trees as inference rules and
//!   every tree as a set; see [`views`].
//!
//! Orders
//! - [`RecursiveSequenceOrder`] (canonical) and [`CantorPairingOrder`].
use std::{
    collections::HashSet,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use num_bigint::BigUint;
use once_cell::sync::{Lazy, OnceCell};
use smallvec::SmallVec;

use crate::{
    combinatorics::{bell, catalan},
    error::{Error, Result},
    index::NaturalIndex,
    registry::{Internable, Interner},
    sequence::IntegerSequence,
    tree::PlaneTree,
};

mod orders;
pub mod views;

pub use orders::{CantorPairingOrder, RecursiveSequenceOrder};
pub use views::{AbstractInferenceRule, AbstractMap, AbstractSet};

static REGISTRY: Lazy<Interner<LabeledNode>> = Lazy::new(|| Interner::new("labeled-tree"));

pub(crate) fn registry() -> &'static Interner<LabeledNode> {
    &REGISTRY
}

pub(crate) struct LabeledNode {
    tree: PlaneTree,
    sequence: IntegerSequence,
    hash: u64,
    subtrees: OnceCell<Box<[LabeledTree]>>,
}

impl PartialEq for LabeledNode {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.sequence == other.sequence && self.tree == other.tree
    }
}

impl Eq for LabeledNode {}

impl Drop for LabeledNode {
    fn drop(&mut self) {
        let mut pending: Vec<LabeledTree> = self
            .subtrees
            .take()
            .map(Vec::from)
            .unwrap_or_default();
        while let Some(subtree) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(subtree.0) {
                if let Some(cached) = node.subtrees.take() {
                    pending.extend(cached.into_vec());
                }
            }
        }
    }
}

impl fmt::Display for LabeledNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Frame<'a> {
            Enter(&'a PlaneTree, bool),
            Close,
        }

        let labels = self.sequence.as_slice();
        let mut next_label = 0;
        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        stack.push(Frame::Enter(&self.tree, true));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree, first) => {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", labels[next_label])?;
                    next_label += 1;
                    if !tree.is_leaf() {
                        write!(f, "(")?;
                        stack.push(Frame::Close);
                        for (i, child) in tree.children().iter().enumerate().rev() {
                            stack.push(Frame::Enter(child, i == 0));
                        }
                    }
                }
                Frame::Close => write!(f, ")")?,
            }
        }
        Ok(())
    }
}

impl Internable for LabeledNode {
    fn structural_hash(&self) -> u64 {
        self.hash
    }
}

/// Nested `(label, children)` source shape of a labeled tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelShape {
    pub label: u64,
    pub children: Vec<LabelShape>,
}

impl LabelShape {
    pub fn leaf(label: u64) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    pub fn node(label: u64, children: impl IntoIterator<Item = LabelShape>) -> Self {
        Self {
            label,
            children: children.into_iter().collect(),
        }
    }
}

/// An immutable, interned labeled plane tree.
#[derive(Clone)]
pub struct LabeledTree(Arc<LabeledNode>);

impl LabeledTree {
    /// Pair a shape with its labels.
    ///
    /// Fails with [`Error::LengthMismatch`] unless the sequence has exactly one
    /// element per node.
    pub fn new(tree: PlaneTree, sequence: IntegerSequence) -> Result<Self> {
        if tree.size() != sequence.len() {
            return Err(Error::LengthMismatch {
                tree_size: tree.size(),
                sequence_length: sequence.len(),
            });
        }
        Ok(Self::from_parts(tree, sequence))
    }

    /// Like [`LabeledTree::new`], with signed labels checked for negativity.
    pub fn try_from_signed(tree: PlaneTree, labels: &[i64]) -> Result<Self> {
        Self::new(tree, IntegerSequence::try_from_signed(labels)?)
    }

    /// Caller guarantees `tree.size() == sequence.len()`.
    pub(crate) fn from_parts(tree: PlaneTree, sequence: IntegerSequence) -> Self {
        debug_assert_eq!(tree.size(), sequence.len());
        let mut hasher = DefaultHasher::new();
        "labeled-tree".hash(&mut hasher);
        tree.structural_hash().hash(&mut hasher);
        sequence.structural_hash().hash(&mut hasher);
        Self(REGISTRY.intern(LabeledNode {
            hash: hasher.finish(),
            tree,
            sequence,
            subtrees: OnceCell::new(),
        }))
    }

    pub fn leaf(label: u64) -> Self {
        Self::from_parts(PlaneTree::leaf(), IntegerSequence::new([label]))
    }

    /// The tree `label(s_0, s_1, ...)` built from its immediate subtrees.
    pub fn from_immediate_subtrees(
        label: u64,
        subtrees: impl IntoIterator<Item = LabeledTree>,
    ) -> Self {
        let subtrees: SmallVec<[LabeledTree; 4]> = subtrees.into_iter().collect();
        let tree = PlaneTree::new(subtrees.iter().map(|s| s.tree().clone()));
        let sequence = IntegerSequence::new(
            std::iter::once(label).chain(subtrees.iter().flat_map(|s| s.sequence().iter())),
        );
        Self::from_parts(tree, sequence)
    }

    /// Shorthand for [`LabeledTree::from_immediate_subtrees`].
    pub fn node(label: u64, subtrees: impl IntoIterator<Item = LabeledTree>) -> Self {
        Self::from_immediate_subtrees(label, subtrees)
    }

    /// Build from a nested `(label, children)` shape.
    pub fn from_label_shape(shape: &LabelShape) -> Self {
        enum Frame<'a> {
            Enter(&'a LabelShape),
            Exit(&'a LabelShape),
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut results: SmallVec<[LabeledTree; 16]> = SmallVec::new();
        stack.push(Frame::Enter(shape));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    stack.push(Frame::Exit(node));
                    for child in node.children.iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(node) => {
                    let start = results.len() - node.children.len();
                    let children: SmallVec<[LabeledTree; 4]> = results.drain(start..).collect();
                    results.push(LabeledTree::from_immediate_subtrees(node.label, children));
                }
            }
        }
        results.pop().unwrap_or_else(|| LabeledTree::leaf(shape.label))
    }

    /// Nested `(label, children)` shape of this tree.
    pub fn to_label_shape(&self) -> LabelShape {
        enum Frame<'a> {
            Enter(&'a LabeledTree),
            Exit(&'a LabeledTree),
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut results: Vec<LabelShape> = Vec::new();
        stack.push(Frame::Enter(self));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree) => {
                    stack.push(Frame::Exit(tree));
                    for child in tree.immediate_subtrees().iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(tree) => {
                    let children = results.split_off(results.len() - tree.degree());
                    results.push(LabelShape {
                        label: tree.main_element().value(),
                        children,
                    });
                }
            }
        }
        results.pop().unwrap_or_default()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    /// Same shape and same labels.
    pub fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self == other
    }

    // ===== Components =====

    #[inline]
    pub fn tree(&self) -> &PlaneTree {
        &self.0.tree
    }

    #[inline]
    pub fn sequence(&self) -> &IntegerSequence {
        &self.0.sequence
    }

    /// Label of the root.
    pub fn main_element(&self) -> NaturalIndex {
        // A plane tree has at least one node, hence at least one label.
        NaturalIndex::new(self.0.sequence.first().unwrap_or_default())
    }

    /// Label of the node at pre-order `position`.
    pub fn label(&self, position: usize) -> Option<NaturalIndex> {
        self.0.sequence.get(position).map(NaturalIndex::new)
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.0.tree.degree()
    }

    #[inline]
    pub fn tree_size(&self) -> usize {
        self.0.tree.size()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.tree.is_leaf()
    }

    /// Number of non-leaf nodes (connectives applied).
    pub fn formula_degree(&self) -> usize {
        self.0.tree.internal_node_count()
    }

    // ===== Subtrees =====

    /// The subtree rooted at each child of the root, in order.
    pub fn immediate_subtrees(&self) -> &[LabeledTree] {
        self.0.subtrees.get_or_init(|| {
            let mut offset = 1;
            self.tree()
                .children()
                .iter()
                .map(|child| {
                    let range = offset..offset + child.size();
                    offset = range.end;
                    LabeledTree::from_parts(child.clone(), self.sequence().slice(range))
                })
                .collect()
        })
    }

    pub fn immediate_subtree(&self, index: usize) -> Option<&LabeledTree> {
        self.immediate_subtrees().get(index)
    }

    /// Whether no two immediate subtrees are equal.
    pub fn immediate_subtrees_are_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.degree());
        self.immediate_subtrees().iter().all(|s| seen.insert(s))
    }

    /// Follow child indices from the root; the empty path is the tree itself.
    pub fn subtree_by_path(&self, path: &[usize]) -> Result<LabeledTree> {
        let mut current = self;
        for (depth, &index) in path.iter().enumerate() {
            current = current
                .immediate_subtree(index)
                .ok_or_else(|| Error::InvalidPath {
                    path: path.to_vec(),
                    depth,
                })?;
        }
        Ok(current.clone())
    }

    /// Lazy depth-first pre-order walk over every subtree, the tree itself first.
    ///
    /// Restartable: every call starts a fresh walk.
    pub fn iterate_subtrees(&self) -> LabeledSubtrees {
        LabeledSubtrees {
            stack: SmallVec::from_elem(self.clone(), 1),
        }
    }

    /// Whether `other` occurs as a subtree of `self` (`self` included).
    pub fn contains_subtree(&self, other: &LabeledTree) -> bool {
        other.tree_size() <= self.tree_size() && self.iterate_subtrees().any(|s| s == *other)
    }

    /// Whether `self` occurs as a subtree of `container`.
    pub fn is_subtree_of(&self, container: &LabeledTree) -> bool {
        container.contains_subtree(self)
    }

    // ===== Canonical form =====

    pub fn is_canonical(&self) -> bool {
        self.sequence().is_rgf()
    }

    /// Same shape, labels relabeled by first appearance.
    pub fn canonical_form(&self) -> LabeledTree {
        if self.is_canonical() {
            return self.clone();
        }
        Self::from_parts(self.tree().clone(), self.sequence().to_rgf())
    }

    /// Same shape and same pattern of repeated labels.
    pub fn is_canonically_equivalent(&self, other: &LabeledTree) -> bool {
        self.tree() == other.tree() && self.sequence().is_rgf_equivalent(other.sequence())
    }

    // ===== Views =====

    pub fn as_abstract_set(&self) -> AbstractSet<'_> {
        AbstractSet::new(self)
    }

    pub fn is_abstract_map(&self) -> bool {
        views::is_abstract_map(self)
    }

    pub fn as_abstract_map(&self) -> Result<AbstractMap> {
        AbstractMap::try_from(self)
    }

    pub fn is_inference_rule(&self) -> bool {
        self.degree() == 3
    }

    pub fn as_inference_rule(&self) -> Result<AbstractInferenceRule> {
        AbstractInferenceRule::try_from(self)
    }
}

/// Number of labeled trees with `size` nodes and labels in `0..=max_label`:
/// `Catalan(size - 1) * (max_label + 1)^size`.
pub fn count_labeled_trees(size: u32, max_label: u64) -> BigUint {
    match size {
        0 => BigUint::default(),
        size => catalan(size as u64 - 1) * (BigUint::from(max_label) + 1u8).pow(size),
    }
}

/// Number of canonical labeled trees with `size` nodes: `Catalan(size - 1) * Bell(size)`.
pub fn count_canonical_labeled_trees(size: u64) -> BigUint {
    match size {
        0 => BigUint::default(),
        size => catalan(size - 1) * bell(size),
    }
}

/// Iterator returned by [`LabeledTree::iterate_subtrees`].
pub struct LabeledSubtrees {
    stack: SmallVec<[LabeledTree; 16]>,
}

impl Iterator for LabeledSubtrees {
    type Item = LabeledTree;

    fn next(&mut self) -> Option<LabeledTree> {
        let tree = self.stack.pop()?;
        self.stack
            .extend(tree.immediate_subtrees().iter().rev().cloned());
        Some(tree)
    }
}

// ===== Standard traits =====

impl PartialEq for LabeledTree {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for LabeledTree {}

impl Hash for LabeledTree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

/// Function notation: `0(1(2), 3)`.
impl fmt::Display for LabeledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for LabeledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabeledTree({})", self.0)
    }
}

impl From<&LabelShape> for LabeledTree {
    fn from(shape: &LabelShape) -> Self {
        Self::from_label_shape(shape)
    }
}
