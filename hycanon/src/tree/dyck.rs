//! Catalan-indexed order over plane trees.
//!
//! Trees are sorted by size, then by their Dyck word with `(` before `)`.
//! There are `Catalan(k - 1)` trees with `k` nodes, so the first tree of size
//! `k` has rank `Catalan(0) + ... + Catalan(k - 2)`:
//!
//! | rank | word       | rank | word         |
//! |------|------------|------|--------------|
//! | 0    | `()`       | 3    | `(()())`     |
//! | 1    | `(())`     | 4    | `(((())))`   |
//! | 2    | `((()))`   | 5    | `((()()))`   |
//!
//! Inside a size class the rank of the inner word (the word without its
//! outer pair) is computed position by position: each `)` adds the number of
//! valid completions that would have started with a `(` there. Completions
//! are counted with the ballot formula, reusing the memoized binomials.
use std::cmp::Ordering;

use num_bigint::BigUint;

use super::PlaneTree;
use crate::{
    combinatorics::{binomial, catalan, catalan_prefix_sum},
    error::Result,
    order::OrderRelation,
};

/// Number of plane trees with `n` nodes: `Catalan(n - 1)`, and `0` for `n = 0`.
pub fn count_trees_of_size(n: u64) -> BigUint {
    match n {
        0 => BigUint::default(),
        n => catalan(n - 1),
    }
}

/// Lattice paths of `steps` unit steps from height `height` down to `0` that
/// never go below `0`.
fn completions(steps: u64, height: u64) -> BigUint {
    if height > steps || (steps - height) % 2 == 1 {
        return BigUint::default();
    }
    let ups = (steps - height) / 2;
    match ups {
        0 => binomial(steps, 0),
        ups => binomial(steps, ups) - binomial(steps, ups - 1),
    }
}

/// Size first, then lexicographic Dyck word. Bijective with ℕ; the leaf has rank `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DyckWordOrder;

impl DyckWordOrder {
    pub fn compare(x: &PlaneTree, y: &PlaneTree) -> Ordering {
        if x.ptr_eq(y) {
            return Ordering::Equal;
        }
        x.size()
            .cmp(&y.size())
            .then_with(|| x.dyck_word().cmp(&y.dyck_word()))
    }

    fn unrank_of(n: &BigUint) -> Result<PlaneTree> {
        let mut residual = n.clone();
        let mut size = 1u64;
        loop {
            let class = catalan(size - 1);
            if residual < class {
                break;
            }
            residual -= class;
            size += 1;
        }

        let length = 2 * (size - 1);
        let mut word = String::with_capacity(length as usize + 2);
        word.push('(');
        let mut height = 0u64;
        for position in 0..length {
            let remaining = length - position - 1;
            let opening = completions(remaining, height + 1);
            if residual < opening {
                word.push('(');
                height += 1;
            } else {
                residual -= opening;
                word.push(')');
                height -= 1;
            }
        }
        word.push(')');
        PlaneTree::from_dyck_word(&word)
    }
}

impl OrderRelation for DyckWordOrder {
    type Element = PlaneTree;

    fn name(&self) -> &'static str {
        "dyck-word"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        true
    }

    fn relates(&self, x: &PlaneTree, y: &PlaneTree) -> Result<bool> {
        Ok(Self::compare(x, y).is_lt())
    }

    fn least_element(&self) -> PlaneTree {
        PlaneTree::leaf()
    }

    fn successor(&self, x: &PlaneTree) -> Result<PlaneTree> {
        Self::unrank_of(&(self.rank(x)? + 1u8))
    }

    fn rank(&self, x: &PlaneTree) -> Result<BigUint> {
        let size = x.size() as u64;
        let mut rank = catalan_prefix_sum(size - 1);

        let word = x.dyck_word();
        let inner = &word.as_bytes()[1..word.len() - 1];
        let length = inner.len() as u64;
        let mut height = 0u64;
        for (position, &c) in inner.iter().enumerate() {
            if c == b'(' {
                height += 1;
            } else {
                rank += completions(length - position as u64 - 1, height + 1);
                height -= 1;
            }
        }
        Ok(rank)
    }

    fn unrank(&self, n: &BigUint) -> Result<PlaneTree> {
        Self::unrank_of(n)
    }
}

/// Iterator over every plane tree of a given size, in ascending order.
pub struct TreesOfSize {
    next: BigUint,
    end: BigUint,
}

impl TreesOfSize {
    pub fn new(size: u64) -> Self {
        let start = match size {
            0 => BigUint::default(),
            size => catalan_prefix_sum(size - 1),
        };
        let end = &start + count_trees_of_size(size);
        Self { next: start, end }
    }
}

impl Iterator for TreesOfSize {
    type Item = PlaneTree;

    fn next(&mut self) -> Option<PlaneTree> {
        if self.next >= self.end {
            return None;
        }
        let tree = DyckWordOrder::unrank_of(&self.next).ok()?;
        self.next += 1u8;
        Some(tree)
    }
}

impl PlaneTree {
    /// Every tree with `size` nodes, in [`DyckWordOrder`].
    pub fn trees_of_size(size: u64) -> TreesOfSize {
        TreesOfSize::new(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ballot_completions() {
        // From height 0 in 4 steps: ()(), (()).
        assert_eq!(completions(4, 0), BigUint::from(2u8));
        assert_eq!(completions(3, 1), BigUint::from(2u8));
        assert_eq!(completions(2, 2), BigUint::from(1u8));
        assert_eq!(completions(3, 0), BigUint::default());
        assert_eq!(completions(1, 2), BigUint::default());
    }
}
