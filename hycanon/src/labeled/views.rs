//! Semantic readings of a labeled tree's shape.
//!
//! Views are predicates plus borrowed accessors, not new types of tree:
//!
//! - every tree is an **abstract set** whose elements are its immediate subtrees;
//! - a tree `m(P(k_0, ..., k_n), I(v_0, ..., v_n))` whose preimage `P` has
//!   pairwise distinct elements is an **abstract map** sending `k_i` to `v_i`;
//! - a tree of degree 3 is an **abstract inference rule**
//!   `r(variables, premises, conclusion)`.
use super::LabeledTree;
use crate::error::{Error, Result};

/// The immediate subtrees of a tree, read as a collection.
#[derive(Debug, Clone, Copy)]
pub struct AbstractSet<'a> {
    tree: &'a LabeledTree,
}

impl<'a> AbstractSet<'a> {
    pub(super) fn new(tree: &'a LabeledTree) -> Self {
        Self { tree }
    }

    pub fn elements(&self) -> &'a [LabeledTree] {
        self.tree.immediate_subtrees()
    }

    pub fn len(&self) -> usize {
        self.tree.degree()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_leaf()
    }

    pub fn contains(&self, element: &LabeledTree) -> bool {
        self.elements().contains(element)
    }

    /// Whether no element occurs twice.
    pub fn is_element_unique(&self) -> bool {
        self.tree.immediate_subtrees_are_unique()
    }
}

pub(super) fn is_abstract_map(tree: &LabeledTree) -> bool {
    match tree.immediate_subtrees() {
        [preimage, image] => {
            preimage.degree() == image.degree() && preimage.immediate_subtrees_are_unique()
        }
        _ => false,
    }
}

/// A finite map read off a degree-2 tree: preimage subtree, image subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractMap {
    preimage: LabeledTree,
    image: LabeledTree,
}

impl AbstractMap {
    /// The tree holding the keys.
    pub fn preimage(&self) -> &LabeledTree {
        &self.preimage
    }

    /// The tree holding the values.
    pub fn image(&self) -> &LabeledTree {
        &self.image
    }

    pub fn keys(&self) -> &[LabeledTree] {
        self.preimage.immediate_subtrees()
    }

    pub fn values(&self) -> &[LabeledTree] {
        self.image.immediate_subtrees()
    }

    pub fn len(&self) -> usize {
        self.preimage.degree()
    }

    pub fn is_empty(&self) -> bool {
        self.preimage.is_leaf()
    }

    /// Value associated with a structurally equal key.
    pub fn get(&self, key: &LabeledTree) -> Option<&LabeledTree> {
        let index = self.keys().iter().position(|k| k == key)?;
        self.values().get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabeledTree, &LabeledTree)> + '_ {
        self.keys().iter().zip(self.values().iter())
    }
}

impl TryFrom<&LabeledTree> for AbstractMap {
    type Error = Error;

    fn try_from(tree: &LabeledTree) -> Result<Self> {
        match tree.immediate_subtrees() {
            [preimage, image] if is_abstract_map(tree) => Ok(Self {
                preimage: preimage.clone(),
                image: image.clone(),
            }),
            _ => Err(Error::NotAnAbstractMap {
                tree: tree.to_string(),
            }),
        }
    }
}

/// `r(variables, premises, conclusion)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractInferenceRule {
    pub variables: LabeledTree,
    pub premises: LabeledTree,
    pub conclusion: LabeledTree,
}

impl AbstractInferenceRule {
    pub fn variables(&self) -> AbstractSet<'_> {
        self.variables.as_abstract_set()
    }

    pub fn premises(&self) -> AbstractSet<'_> {
        self.premises.as_abstract_set()
    }
}

impl TryFrom<&LabeledTree> for AbstractInferenceRule {
    type Error = Error;

    fn try_from(tree: &LabeledTree) -> Result<Self> {
        match tree.immediate_subtrees() {
            [variables, premises, conclusion] => Ok(Self {
                variables: variables.clone(),
                premises: premises.clone(),
                conclusion: conclusion.clone(),
            }),
            _ => Err(Error::NotAnInferenceRule {
                tree: tree.to_string(),
            }),
        }
    }
}
