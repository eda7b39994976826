//! Map-based rewriting of labeled trees.
//!
//! A [`Substitution`] maps labeled trees to labeled trees. Applying it walks
//! the target depth-first; a subtree equal to a key is replaced wholesale by
//! the associated value (its own subtrees are not visited), every other
//! node is rebuilt from its possibly rewritten children. Neither the target
//! nor the map is modified; untouched subtrees are shared with the target.
//!
//! ```
//! use hycanon::labeled::LabeledTree;
//! use hycanon::substitution::Substitution;
//!
//! let (a, b, c, d, z) = (0, 1, 2, 3, 25);
//! let key = LabeledTree::node(b, [LabeledTree::leaf(c)]);
//! let target = LabeledTree::node(a, [key.clone(), LabeledTree::leaf(d)]);
//!
//! let mut map = Substitution::new();
//! map.insert(key, LabeledTree::leaf(z)).unwrap();
//!
//! let expected = LabeledTree::node(a, [LabeledTree::leaf(z), LabeledTree::leaf(d)]);
//! assert_eq!(map.apply(&target), expected);
//! ```
use std::collections::HashMap;

use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    labeled::{AbstractMap, LabeledTree},
};

/// A finite map from labeled trees to labeled trees, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    keys: Vec<LabeledTree>,
    values: Vec<LabeledTree>,
    index: HashMap<LabeledTree, usize>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key ↦ value`. Re-inserting an identical pair is a no-op; a
    /// different value for an existing key fails with [`Error::DuplicateKey`].
    pub fn insert(&mut self, key: LabeledTree, value: LabeledTree) -> Result<()> {
        if let Some(&i) = self.index.get(&key) {
            if self.values[i] == value {
                return Ok(());
            }
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        self.values.push(value);
        Ok(())
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (LabeledTree, LabeledTree)>) -> Result<Self> {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value)?;
        }
        Ok(map)
    }

    /// Read a map off a tree shaped `m(P(k_0, ...), I(v_0, ...))`.
    pub fn from_abstract_map(tree: &LabeledTree) -> Result<Self> {
        let map = AbstractMap::try_from(tree)?;
        Self::from_pairs(map.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Encode as `map_label(preimage_label(keys...), image_label(values...))`.
    pub fn to_abstract_map(&self, map_label: u64, preimage_label: u64, image_label: u64) -> LabeledTree {
        LabeledTree::node(
            map_label,
            [
                LabeledTree::node(preimage_label, self.keys.iter().cloned()),
                LabeledTree::node(image_label, self.values.iter().cloned()),
            ],
        )
    }

    pub fn get(&self, key: &LabeledTree) -> Option<&LabeledTree> {
        self.index.get(key).map(|&i| &self.values[i])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabeledTree, &LabeledTree)> + '_ {
        self.keys.iter().zip(self.values.iter())
    }

    /// Rewrite `target`, see the module documentation.
    pub fn apply(&self, target: &LabeledTree) -> LabeledTree {
        enum Frame<'a> {
            Enter(&'a LabeledTree),
            Exit(&'a LabeledTree),
        }

        if self.is_empty() {
            return target.clone();
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut results: SmallVec<[LabeledTree; 16]> = SmallVec::new();
        stack.push(Frame::Enter(target));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree) => {
                    if let Some(value) = self.get(tree) {
                        results.push(value.clone());
                    } else if tree.is_leaf() {
                        results.push(tree.clone());
                    } else {
                        stack.push(Frame::Exit(tree));
                        for child in tree.immediate_subtrees().iter().rev() {
                            stack.push(Frame::Enter(child));
                        }
                    }
                }
                Frame::Exit(tree) => {
                    let start = results.len() - tree.degree();
                    let unchanged = results[start..]
                        .iter()
                        .zip(tree.immediate_subtrees())
                        .all(|(new, old)| new.ptr_eq(old));
                    if unchanged {
                        results.truncate(start);
                        results.push(tree.clone());
                    } else {
                        let children: SmallVec<[LabeledTree; 4]> = results.drain(start..).collect();
                        results.push(LabeledTree::from_immediate_subtrees(
                            tree.main_element().value(),
                            children,
                        ));
                    }
                }
            }
        }

        results.pop().unwrap_or_else(|| target.clone())
    }
}

impl LabeledTree {
    /// Apply `map` to this tree. See [`Substitution::apply`].
    pub fn substitute(&self, map: &Substitution) -> LabeledTree {
        map.apply(self)
    }

    /// Apply the map encoded by the abstract-map tree `map`.
    pub fn substitute_abstract_map(&self, map: &LabeledTree) -> Result<LabeledTree> {
        Ok(Substitution::from_abstract_map(map)?.apply(self))
    }

    /// Whether some assignment of the `variables` turns `self` into `other`.
    ///
    /// Each variable is a subtree of `self` that may stand for any subtree of
    /// `other`, consistently across its occurrences. Every other node must
    /// match label for label and child for child.
    pub fn is_equivalent_with_variables(&self, other: &LabeledTree, variables: &[LabeledTree]) -> bool {
        let mut assignment: HashMap<&LabeledTree, &LabeledTree> = HashMap::new();
        let mut stack: SmallVec<[(&LabeledTree, &LabeledTree); 16]> = SmallVec::new();
        stack.push((self, other));

        while let Some((pattern, candidate)) = stack.pop() {
            if let Some(variable) = variables.iter().find(|v| *v == pattern) {
                match assignment.get(variable) {
                    Some(bound) if *bound != candidate => return false,
                    Some(_) => {}
                    None => {
                        assignment.insert(variable, candidate);
                    }
                }
                continue;
            }
            if pattern.main_element() != candidate.main_element() || pattern.degree() != candidate.degree() {
                return false;
            }
            stack.extend(
                pattern
                    .immediate_subtrees()
                    .iter()
                    .zip(candidate.immediate_subtrees().iter()),
            );
        }
        true
    }
}
