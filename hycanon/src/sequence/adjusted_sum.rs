//! The canonical order: adjusted sum, then length, then reverse lexicographic.
//!
//! The adjusted sum of a sequence is `sum + length`. An adjusted-sum class
//! `s` is finite: writing each element as `e + 1` turns its members into the
//! compositions of `s` into positive parts. Hence
//!
//! - class `s` holds `1` sequence for `s = 0` and `2^(s-1)` for `s >= 1`;
//! - class `(s, l)` (adjusted sum `s`, length `l`) holds `C(s-1, l-1)`.
//!
//! Inside a `(s, l)` class the order runs from `(s-l, 0, ..., 0)` to
//! `(0, ..., 0, s-l)`, i.e. by decreasing lexicographic order. The
//! enumeration starts with
//!
//! | rank | sequence    | rank | sequence       |
//! |------|-------------|------|----------------|
//! | 0    | `()`        | 4    | `(2,)`         |
//! | 1    | `(0,)`      | 5    | `(1, 0)`       |
//! | 2    | `(1,)`      | 6    | `(0, 1)`       |
//! | 3    | `(0, 0)`    | 7    | `(0, 0, 0)`    |
use std::cmp::Ordering;

use num_bigint::BigUint;

use super::IntegerSequence;
use crate::{
    combinatorics::{binomial, compositions, one, pow2},
    error::{Error, Result},
    order::OrderRelation,
};

/// Adjusted-sum first, length second, reverse lexicographic third.
///
/// Well-founded and order-isomorphic to (ℕ, <). `rank` and `unrank` are
/// closed-form (memoized binomials); no enumeration walk is involved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AdjustedSumOrder;

const NAME: &str = "adjusted-sum";

fn adjusted_sum(x: &IntegerSequence) -> Result<u64> {
    u64::try_from(x.adjusted_sum()).map_err(|_| Error::RankOverflow { order: NAME })
}

impl AdjustedSumOrder {
    /// Direct comparison, without computing ranks.
    pub fn compare(x: &IntegerSequence, y: &IntegerSequence) -> Ordering {
        x.adjusted_sum()
            .cmp(&y.adjusted_sum())
            .then_with(|| x.len().cmp(&y.len()))
            .then_with(|| y.as_slice().cmp(x.as_slice()))
    }

    /// Number of sequences with adjusted sum `s`.
    pub fn adjusted_sum_class_cardinality(s: u64) -> BigUint {
        match s {
            0 => one(),
            s => pow2(s - 1),
        }
    }

    /// Number of sequences with adjusted sum `s` and length `l`.
    pub fn adjusted_sum_and_length_class_cardinality(s: u64, l: u64) -> BigUint {
        compositions(s, l)
    }

    /// Least member of class `(s, l)`: `(s - l, 0, ..., 0)`. `None` for an empty class.
    pub fn first_of_class(s: u64, l: u64) -> Option<IntegerSequence> {
        match (s, l) {
            (0, 0) => Some(IntegerSequence::empty()),
            (_, 0) => None,
            (s, l) if l > s => None,
            (s, l) => Some(IntegerSequence::new(
                std::iter::once(s - l).chain(std::iter::repeat_n(0, (l - 1) as usize)),
            )),
        }
    }

    /// Greatest member of class `(s, l)`: `(0, ..., 0, s - l)`. `None` for an empty class.
    pub fn last_of_class(s: u64, l: u64) -> Option<IntegerSequence> {
        match (s, l) {
            (0, 0) => Some(IntegerSequence::empty()),
            (_, 0) => None,
            (s, l) if l > s => None,
            (s, l) => Some(IntegerSequence::new(
                std::iter::repeat_n(0, (l - 1) as usize).chain(std::iter::once(s - l)),
            )),
        }
    }

    /// Position of `x` among the members of its `(s, l)` class sorted by
    /// increasing lexicographic order.
    pub fn lexicographic_rank_within_class(x: &IntegerSequence) -> Result<BigUint> {
        let s = adjusted_sum(x)?;
        let l = x.len() as u64;
        let mut rank = BigUint::default();
        let mut remaining = s;
        for (i, &e) in x.as_slice().iter().enumerate().take(x.len().saturating_sub(1)) {
            // Compositions of `remaining` into `k + 1` parts whose first part is below `e + 1`.
            let k = l - (i as u64 + 1);
            rank += binomial(remaining - 1, k) - binomial(remaining - (e + 1), k);
            remaining -= e + 1;
        }
        Ok(rank)
    }

    /// Position of `x` inside its `(s, l)` class under this order.
    pub fn reverse_lexicographic_rank_within_class(x: &IntegerSequence) -> Result<BigUint> {
        let s = adjusted_sum(x)?;
        let cardinality = compositions(s, x.len() as u64);
        Ok(cardinality - one() - Self::lexicographic_rank_within_class(x)?)
    }

    /// Rank of `x` among sequences of the same length: by sum, then reverse
    /// lexicographic. A bijection between `ℕ^l` and `ℕ` for every `l`.
    pub fn rank_within_length(x: &IntegerSequence) -> Result<BigUint> {
        if x.is_empty() {
            return Ok(BigUint::default());
        }
        let sum = u64::try_from(x.sum()).map_err(|_| Error::RankOverflow { order: NAME })?;
        let l = x.len() as u64;
        // Sequences of length l with a smaller sum: sum_{t < sum} C(t + l - 1, l - 1) = C(sum + l - 1, l).
        Ok(binomial(sum + l - 1, l) + Self::reverse_lexicographic_rank_within_class(x)?)
    }

    /// Inverse of [`AdjustedSumOrder::rank_within_length`].
    pub fn unrank_within_length(n: &BigUint, length: usize) -> Result<IntegerSequence> {
        if length == 0 {
            return match n.bits() {
                0 => Ok(IntegerSequence::empty()),
                _ => Err(Error::OutsideImage {
                    order: NAME,
                    rank: n.to_string(),
                }),
            };
        }

        let l = length as u64;
        let below = |sum: u64| binomial(sum + l - 1, l);
        // Bracket the sum, then bisect: below(sum) <= n < below(sum + 1).
        let mut hi = 1u64;
        while below(hi) <= *n {
            hi *= 2;
        }
        let mut lo = 0u64;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if below(mid) <= *n {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let sum = lo;
        let residual = n - below(sum);
        let cardinality = compositions(sum + l, l);
        let lex = cardinality - one() - residual;
        Ok(IntegerSequence::new(unrank_composition(sum + l, l, lex)))
    }

    /// Inverse of the rank; total over ℕ.
    pub fn unrank_of(n: &BigUint) -> IntegerSequence {
        if n.bits() == 0 {
            return IntegerSequence::empty();
        }

        // Classes below s hold 2^(s-1) sequences in total, so s is the bit length of n.
        let s = n.bits();
        let mut residual = n - pow2(s - 1);
        let mut l = 1;
        let mut cardinality = compositions(s, l);
        while residual >= cardinality {
            residual -= cardinality;
            l += 1;
            cardinality = compositions(s, l);
        }
        let lex = cardinality - one() - residual;
        IntegerSequence::new(unrank_composition(s, l, lex))
    }
}

/// The `lex`-th composition of `s` into `l` positive parts (lexicographic),
/// each part shifted down by one.
fn unrank_composition(s: u64, l: u64, mut lex: BigUint) -> Vec<u64> {
    let mut elements = Vec::with_capacity(l as usize);
    let mut remaining = s;
    for i in 0..l - 1 {
        let k = l - (i + 1);
        // Number of compositions whose first part is below v: C(r-1, k) - C(r-v, k).
        // Largest v in [1, r - k] for which that count is <= lex.
        let total = binomial(remaining - 1, k);
        let below = |v: u64| &total - binomial(remaining - v, k);
        let (mut lo, mut hi) = (1u64, remaining - k);
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if below(mid) <= lex {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lex -= below(lo);
        elements.push(lo - 1);
        remaining -= lo;
    }
    elements.push(remaining - 1);
    elements
}

impl OrderRelation for AdjustedSumOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        true
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(Self::compare(x, y).is_lt())
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    /// Three cases:
    ///  1) some position before the last is positive: move one unit from the
    ///     rightmost such position to its right neighbour and gather the whole
    ///     tail there;
    ///  2) otherwise, if the last element is positive, `(0, ..., 0, N)` becomes
    ///     `(N - 1, 0, ..., 0)` one element longer;
    ///  3) otherwise (all zeros), open the next adjusted-sum class with `(s,)`.
    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        let elements = x.as_slice();
        let l = elements.len();
        let overflow = || Error::RankOverflow { order: NAME };

        if let Some(i) = (0..l.saturating_sub(1)).rev().find(|&i| elements[i] > 0) {
            let tail: u64 = elements[i + 1..]
                .iter()
                .try_fold(1u64, |acc, &e| acc.checked_add(e))
                .ok_or_else(overflow)?;
            let mut next = elements.to_vec();
            next[i] -= 1;
            next[i + 1] = tail;
            next[i + 2..].iter_mut().for_each(|e| *e = 0);
            return Ok(IntegerSequence::new(next));
        }

        match elements.last() {
            Some(&last) if last > 0 => Ok(IntegerSequence::new(
                std::iter::once(last - 1).chain(std::iter::repeat_n(0, l)),
            )),
            _ => Ok(IntegerSequence::new([adjusted_sum(x)?])),
        }
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        if x.is_empty() {
            return Ok(BigUint::default());
        }
        let s = adjusted_sum(x)?;
        let mut rank = pow2(s - 1);
        for shorter in 1..x.len() as u64 {
            rank += compositions(s, shorter);
        }
        rank += Self::reverse_lexicographic_rank_within_class(x)?;
        Ok(rank)
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        Ok(Self::unrank_of(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_unrank_is_lexicographic() {
        // Compositions of 4 into 2 parts: (1,3) (2,2) (3,1).
        let firsts: Vec<Vec<u64>> = (0..3u8)
            .map(|i| unrank_composition(4, 2, BigUint::from(i)))
            .collect();
        assert_eq!(firsts, vec![vec![0, 2], vec![1, 1], vec![2, 0]]);
        assert_eq!(unrank_composition(3, 1, BigUint::default()), vec![2]);
    }
}
