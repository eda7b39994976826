//! Immutable, hash-consed sequences of natural numbers.
//!
//! Role
//! - Label carrier of [`LabeledTree`](crate::labeled::LabeledTree) and the meta-sequences
//!   used to rank labeled trees.
//! - Domain of eight interchangeable orders (see [`SequenceOrder`]).
//!
//! Identity
//! - Every constructor goes through the sequence registry; two sequences with the same
//!   elements are the same allocation ([`IntegerSequence::ptr_eq`]).
//!
//! The built-in [`Ord`] implementation is the canonical adjusted-sum order.
use std::{
    cmp::Ordering,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    ops::Range,
    sync::Arc,
};

use num_bigint::BigUint;
use once_cell::sync::{Lazy, OnceCell};
use smallvec::SmallVec;

use crate::{
    error::Result,
    index::NaturalIndex,
    order::OrderRelation,
    registry::{Internable, Interner},
};

mod adjusted_sum;
mod godel;
mod kind;
mod lexicographic;
mod packed;

pub use adjusted_sum::AdjustedSumOrder;
pub use godel::{GodelOrder, RefinedGodelOrder};
pub use kind::SequenceOrder;
pub use lexicographic::{LengthFirstLexicographicOrder, LexicographicOrder, SumFirstLexicographicOrder};
pub use packed::{CantorTuplingOrder, DEFAULT_FIELD_WIDTH, FixedWidthSentinelOrder};

static REGISTRY: Lazy<Interner<SequenceNode>> = Lazy::new(|| Interner::new("integer-sequence"));

pub(crate) fn registry() -> &'static Interner<SequenceNode> {
    &REGISTRY
}

pub(crate) struct SequenceNode {
    elements: SmallVec<[u64; 8]>,
    hash: u64,
    sum: u128,
    image: OnceCell<Box<[u64]>>,
    // `None` when the sequence already is its own restricted-growth normal form.
    rgf: OnceCell<Option<IntegerSequence>>,
}

impl SequenceNode {
    fn new(elements: SmallVec<[u64; 8]>) -> Self {
        let mut hasher = DefaultHasher::new();
        "integer-sequence".hash(&mut hasher);
        elements.as_slice().hash(&mut hasher);
        let sum = elements.iter().map(|&e| e as u128).sum();
        Self {
            hash: hasher.finish(),
            elements,
            sum,
            image: OnceCell::new(),
            rgf: OnceCell::new(),
        }
    }
}

impl PartialEq for SequenceNode {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.elements == other.elements
    }
}

impl Eq for SequenceNode {}

impl fmt::Display for SequenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        if self.elements.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl Internable for SequenceNode {
    fn structural_hash(&self) -> u64 {
        self.hash
    }
}

/// A finite, immutable, interned sequence of natural numbers.
///
/// Cloning is a reference-count increment.
#[derive(Clone)]
pub struct IntegerSequence(Arc<SequenceNode>);

impl IntegerSequence {
    pub fn new(elements: impl IntoIterator<Item = u64>) -> Self {
        Self(REGISTRY.intern(SequenceNode::new(elements.into_iter().collect())))
    }

    pub fn from_slice(elements: &[u64]) -> Self {
        Self::new(elements.iter().copied())
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Checked construction from signed values.
    ///
    /// Fails with [`Error::NegativeElement`](crate::error::Error::NegativeElement)
    /// on the first negative value.
    pub fn try_from_signed(elements: &[i64]) -> Result<Self> {
        let elements = elements
            .iter()
            .enumerate()
            .map(|(i, &e)| NaturalIndex::try_from_signed(i, e).map(NaturalIndex::value))
            .collect::<Result<SmallVec<[u64; 8]>>>()?;
        Ok(Self(REGISTRY.intern(SequenceNode::new(elements))))
    }

    /// Whether `self` and `other` are the same interned instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Value equality (same length, pointwise equal elements).
    pub fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self == other
    }

    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    // ===== Elements =====

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.0.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.0.elements.get(index).copied()
    }

    pub fn first(&self) -> Option<u64> {
        self.0.elements.first().copied()
    }

    pub fn last(&self) -> Option<u64> {
        self.0.elements.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.elements.iter().copied()
    }

    pub fn sum(&self) -> u128 {
        self.0.sum
    }

    /// `sum + length`.
    pub fn adjusted_sum(&self) -> u128 {
        self.0.sum + self.len() as u128
    }

    /// Largest element, `None` for the empty sequence.
    pub fn max_value(&self) -> Option<u64> {
        self.0.elements.iter().copied().max()
    }

    /// Sorted distinct values.
    pub fn image(&self) -> &[u64] {
        self.0.image.get_or_init(|| {
            let mut image = self.0.elements.to_vec();
            image.sort_unstable();
            image.dedup();
            image.into_boxed_slice()
        })
    }

    pub fn image_cardinality(&self) -> usize {
        self.image().len()
    }

    pub fn is_increasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[0] <= w[1])
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[0] < w[1])
    }

    // ===== Restricted growth =====

    /// Whether the sequence is a restricted-growth function: it starts with `0`
    /// and every element is at most one more than the maximum of the
    /// elements before it. The empty sequence qualifies.
    pub fn is_rgf(&self) -> bool {
        let mut bound = 0u64;
        for &e in self.as_slice() {
            if e > bound {
                return false;
            }
            if e == bound {
                bound += 1;
            }
        }
        true
    }

    /// Relabel by order of first appearance: `(4, 3, 4, 1)` becomes `(0, 1, 0, 2)`.
    pub fn to_rgf(&self) -> IntegerSequence {
        let normal = self.0.rgf.get_or_init(|| {
            if self.is_rgf() {
                return None;
            }
            let mut seen: Vec<u64> = Vec::new();
            let relabeled = self.iter().map(|e| match seen.iter().position(|&v| v == e) {
                Some(p) => p as u64,
                None => {
                    seen.push(e);
                    (seen.len() - 1) as u64
                }
            });
            Some(IntegerSequence::new(relabeled.collect::<Vec<_>>()))
        });
        normal.clone().unwrap_or_else(|| self.clone())
    }

    /// Whether both sequences repeat their values with the same pattern.
    pub fn is_rgf_equivalent(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_rgf() == other.to_rgf()
    }

    // ===== Transformations =====

    pub fn concatenate(&self, other: &Self) -> Self {
        Self::new(self.iter().chain(other.iter()))
    }

    /// Add `n` to every element, `None` on overflow.
    pub fn scalar_add(&self, n: u64) -> Option<Self> {
        let shifted = self
            .iter()
            .map(|e| e.checked_add(n))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(shifted))
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.as_slice().iter().rev().copied())
    }

    /// # Panics
    /// When `range` is out of bounds, like slice indexing.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self::from_slice(&self.as_slice()[range])
    }

    // ===== Orders =====

    /// Rank under the canonical adjusted-sum order.
    pub fn rank(&self) -> Result<BigUint> {
        AdjustedSumOrder.rank(self)
    }

    /// Inverse of [`IntegerSequence::rank`].
    pub fn unrank(n: &BigUint) -> Result<Self> {
        AdjustedSumOrder.unrank(n)
    }

    /// Successor under the canonical adjusted-sum order.
    pub fn successor(&self) -> Result<Self> {
        AdjustedSumOrder.successor(self)
    }

    pub fn rank_under(&self, order: SequenceOrder) -> Result<BigUint> {
        order.rank(self)
    }

    pub fn unrank_under(order: SequenceOrder, n: &BigUint) -> Result<Self> {
        order.unrank(n)
    }

    pub fn successor_under(&self, order: SequenceOrder) -> Result<Self> {
        order.successor(self)
    }
}

// ===== Standard traits =====

impl PartialEq for IntegerSequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for IntegerSequence {}

impl Hash for IntegerSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl PartialOrd for IntegerSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntegerSequence {
    fn cmp(&self, other: &Self) -> Ordering {
        AdjustedSumOrder::compare(self, other)
    }
}

impl fmt::Display for IntegerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for IntegerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntegerSequence{}", self.0)
    }
}

impl Default for IntegerSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&[u64]> for IntegerSequence {
    fn from(elements: &[u64]) -> Self {
        Self::from_slice(elements)
    }
}

impl From<Vec<u64>> for IntegerSequence {
    fn from(elements: Vec<u64>) -> Self {
        Self::new(elements)
    }
}

impl<const N: usize> From<[u64; N]> for IntegerSequence {
    fn from(elements: [u64; N]) -> Self {
        Self::new(elements)
    }
}

impl TryFrom<&[i64]> for IntegerSequence {
    type Error = crate::error::Error;

    fn try_from(elements: &[i64]) -> Result<Self> {
        Self::try_from_signed(elements)
    }
}

impl FromIterator<u64> for IntegerSequence {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl FromIterator<NaturalIndex> for IntegerSequence {
    fn from_iter<I: IntoIterator<Item = NaturalIndex>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(NaturalIndex::value))
    }
}

impl<'a> IntoIterator for &'a IntegerSequence {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}

/// Build an [`IntegerSequence`] from its elements: `seq![0, 1, 0, 2]`.
#[macro_export]
macro_rules! seq {
    () => {
        $crate::sequence::IntegerSequence::empty()
    };
    ($($e:expr),+ $(,)?) => {
        $crate::sequence::IntegerSequence::from_slice(&[$($e),+])
    };
}
