//! Ordered (plane) trees without labels.
//!
//! Role
//! - Shape substrate of [`LabeledTree`](crate::labeled::LabeledTree).
//! - Hash-consed: structurally identical trees share one allocation, so
//!   equality of interned trees is a pointer comparison.
//!
//! Encoding
//! - The AHU word of a tree is `(` followed by the words of its children in
//!   order, followed by `)`. Children are never sorted: `(()(()))` and
//!   `((())())` are different plane trees.
//!
//! Every traversal in this module uses an explicit work stack, so deep trees
//! never exhaust the call stack.
use std::{
    cmp::Ordering,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use num_bigint::BigUint;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    registry::{Internable, Interner},
};

mod dyck;

pub use dyck::{DyckWordOrder, TreesOfSize, count_trees_of_size};

static REGISTRY: Lazy<Interner<TreeNode>> = Lazy::new(|| Interner::new("plane-tree"));

pub(crate) fn registry() -> &'static Interner<TreeNode> {
    &REGISTRY
}

pub(crate) struct TreeNode {
    children: SmallVec<[PlaneTree; 4]>,
    size: usize,
    height: usize,
    hash: u64,
}

impl TreeNode {
    fn new(children: SmallVec<[PlaneTree; 4]>) -> Self {
        let mut hasher = DefaultHasher::new();
        "plane-tree".hash(&mut hasher);
        children.len().hash(&mut hasher);
        for child in &children {
            child.0.hash.hash(&mut hasher);
        }
        Self {
            size: 1 + children.iter().map(PlaneTree::size).sum::<usize>(),
            height: 1 + children.iter().map(PlaneTree::height).max().unwrap_or(0),
            hash: hasher.finish(),
            children,
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.size == other.size
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a == b)
    }
}

impl Eq for TreeNode {}

/// Unlinks children onto a work stack so that releasing a deep tree after
/// [`crate::registry::reset`] does not recurse once per level.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<PlaneTree> = self.children.drain(..).collect();
        while let Some(tree) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(tree.0) {
                pending.extend(node.children.drain(..));
            }
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for child in &self.children {
            write!(f, "{}", child.dyck_word())?;
        }
        write!(f, ")")
    }
}

impl Internable for TreeNode {
    fn structural_hash(&self) -> u64 {
        self.hash
    }
}

/// Nested-list source shape of a plane tree: a node is the list of its children.
///
/// `Shape(vec![])` is a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Shape(pub Vec<Shape>);

impl Shape {
    pub fn leaf() -> Self {
        Self(Vec::new())
    }
}

/// An immutable, interned plane tree.
#[derive(Clone)]
pub struct PlaneTree(Arc<TreeNode>);

impl PlaneTree {
    /// A node with the given children, in order.
    pub fn new(children: impl IntoIterator<Item = PlaneTree>) -> Self {
        Self(REGISTRY.intern(TreeNode::new(children.into_iter().collect())))
    }

    pub fn leaf() -> Self {
        Self::new(std::iter::empty())
    }

    /// Build from a nested-list shape.
    pub fn from_shape(shape: &Shape) -> Self {
        enum Frame<'a> {
            Enter(&'a Shape),
            Exit(&'a Shape),
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut results: SmallVec<[PlaneTree; 16]> = SmallVec::new();
        stack.push(Frame::Enter(shape));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    stack.push(Frame::Exit(node));
                    for child in node.0.iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(node) => {
                    let start = results.len() - node.0.len();
                    let children: SmallVec<[PlaneTree; 4]> = results.drain(start..).collect();
                    results.push(PlaneTree::new(children));
                }
            }
        }

        results.pop().unwrap_or_else(PlaneTree::leaf)
    }

    /// Parse a single primitive Dyck word such as `(()())`.
    pub fn from_dyck_word(word: &str) -> Result<Self> {
        let mut open: SmallVec<[Vec<PlaneTree>; 16]> = SmallVec::new();
        let mut root: Option<PlaneTree> = None;

        for (position, c) in word.char_indices() {
            if root.is_some() {
                return Err(Error::InvalidDyckWord { position });
            }
            match c {
                '(' => open.push(Vec::new()),
                ')' => {
                    let children = open.pop().ok_or(Error::InvalidDyckWord { position })?;
                    let node = PlaneTree::new(children);
                    match open.last_mut() {
                        Some(parent) => parent.push(node),
                        None => root = Some(node),
                    }
                }
                _ => return Err(Error::InvalidDyckWord { position }),
            }
        }

        root.ok_or(Error::InvalidDyckWord {
            position: word.len(),
        })
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    /// Same shape, children compared in order.
    pub fn is_structurally_equivalent(&self, other: &Self) -> bool {
        let mut stack: SmallVec<[(&PlaneTree, &PlaneTree); 16]> = SmallVec::new();
        stack.push((self, other));
        while let Some((a, b)) = stack.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            if a.0.hash != b.0.hash || a.size() != b.size() || a.degree() != b.degree() {
                return false;
            }
            stack.extend(a.children().iter().zip(b.children().iter()));
        }
        true
    }

    // ===== Shape queries =====

    #[inline]
    pub fn children(&self) -> &[PlaneTree] {
        &self.0.children
    }

    pub fn child(&self, index: usize) -> Option<&PlaneTree> {
        self.0.children.get(index)
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.0.children.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.size
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[inline]
    pub fn height(&self) -> usize {
        self.0.height
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    /// Number of nodes that have at least one child.
    pub fn internal_node_count(&self) -> usize {
        self.iterate_subtrees().filter(|t| !t.is_leaf()).count()
    }

    /// Follow child indices from the root; the empty path is the root itself.
    pub fn subtree_by_path(&self, path: &[usize]) -> Result<PlaneTree> {
        let mut current = self;
        for (depth, &index) in path.iter().enumerate() {
            current = current.child(index).ok_or_else(|| Error::InvalidPath {
                path: path.to_vec(),
                depth,
            })?;
        }
        Ok(current.clone())
    }

    /// Lazy depth-first pre-order walk over every subtree, the tree itself first.
    pub fn iterate_subtrees(&self) -> Subtrees {
        Subtrees {
            stack: SmallVec::from_elem(self.clone(), 1),
        }
    }

    // ===== Encodings =====

    /// The AHU parenthesis word, e.g. `((()))` for a chain of three nodes.
    pub fn dyck_word(&self) -> String {
        let mut word = String::with_capacity(2 * self.size());
        self.for_each_parenthesis(|open| word.push(if open { '(' } else { ')' }));
        word
    }

    /// The AHU word read as a binary number with `(` as `1` and `)` as `0`.
    ///
    /// The leading `(` makes the encoding safe against leading zeros.
    pub fn ahu_integer(&self) -> BigUint {
        let mut bits: Vec<u8> = Vec::with_capacity(2 * self.size());
        self.for_each_parenthesis(|open| bits.push(open as u8));
        BigUint::from_radix_be(&bits, 2).unwrap_or_default()
    }

    fn for_each_parenthesis(&self, mut emit: impl FnMut(bool)) {
        enum Frame<'a> {
            Enter(&'a PlaneTree),
            Exit,
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        stack.push(Frame::Enter(self));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree) => {
                    emit(true);
                    stack.push(Frame::Exit);
                    for child in tree.children().iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit => emit(false),
            }
        }
    }

    /// Nested-list shape of this tree.
    pub fn to_shape(&self) -> Shape {
        enum Frame<'a> {
            Enter(&'a PlaneTree),
            Exit(usize),
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut results: Vec<Shape> = Vec::new();
        stack.push(Frame::Enter(self));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree) => {
                    stack.push(Frame::Exit(tree.degree()));
                    for child in tree.children().iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(degree) => {
                    let children = results.split_off(results.len() - degree);
                    results.push(Shape(children));
                }
            }
        }
        results.pop().unwrap_or_default()
    }
}

/// Iterator returned by [`PlaneTree::iterate_subtrees`].
pub struct Subtrees {
    stack: SmallVec<[PlaneTree; 16]>,
}

impl Iterator for Subtrees {
    type Item = PlaneTree;

    fn next(&mut self) -> Option<PlaneTree> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().iter().rev().cloned());
        Some(tree)
    }
}

// ===== Standard traits =====

impl PartialEq for PlaneTree {
    fn eq(&self, other: &Self) -> bool {
        self.is_structurally_equivalent(other)
    }
}

impl Eq for PlaneTree {}

impl Hash for PlaneTree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl PartialOrd for PlaneTree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Size first, then Dyck word (`(` before `)`), matching [`DyckWordOrder`].
impl Ord for PlaneTree {
    fn cmp(&self, other: &Self) -> Ordering {
        DyckWordOrder::compare(self, other)
    }
}

impl fmt::Display for PlaneTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dyck_word())
    }
}

impl fmt::Debug for PlaneTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaneTree{}", self.dyck_word())
    }
}

impl Default for PlaneTree {
    fn default() -> Self {
        Self::leaf()
    }
}

impl From<&Shape> for PlaneTree {
    fn from(shape: &Shape) -> Self {
        Self::from_shape(shape)
    }
}

impl std::str::FromStr for PlaneTree {
    type Err = Error;

    fn from_str(word: &str) -> Result<Self> {
        Self::from_dyck_word(word)
    }
}
