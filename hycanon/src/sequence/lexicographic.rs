//! Orders kept for comparison. None of them is isomorphic to (ℕ, <), so
//! they only compare and step; `rank`/`unrank` fail with
//! [`Error::RankUnsupported`].
use std::cmp::Ordering;

use super::IntegerSequence;
use crate::{
    error::{Error, Result},
    order::OrderRelation,
};

fn append_zero(x: &IntegerSequence) -> IntegerSequence {
    IntegerSequence::new(x.iter().chain(std::iter::once(0)))
}

/// Plain lexicographic order; a proper prefix precedes its extensions.
///
/// The immediate successor of `x` is `x` followed by a `0`. `(1,)` is preceded
/// by infinitely many sequences (`(0,)`, `(0, 0)`, `(0, 0, 0)`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LexicographicOrder;

impl OrderRelation for LexicographicOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        "lexicographic"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(x.as_slice() < y.as_slice())
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        Ok(append_zero(x))
    }
}

/// Length first, lexicographic second.
///
/// Every length class is infinite, so no sequence of length 2 has a finite rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LengthFirstLexicographicOrder;

impl LengthFirstLexicographicOrder {
    pub fn compare(x: &IntegerSequence, y: &IntegerSequence) -> Ordering {
        x.len().cmp(&y.len()).then_with(|| x.as_slice().cmp(y.as_slice()))
    }
}

impl OrderRelation for LengthFirstLexicographicOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        "length-first-lexicographic"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(Self::compare(x, y).is_lt())
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    /// Increment the last element.
    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        match x.last() {
            None => Ok(IntegerSequence::new([0])),
            Some(last) => {
                let bumped = last.checked_add(1).ok_or(Error::ElementTooWide {
                    value: last,
                    width: u64::BITS,
                })?;
                let mut next = x.as_slice().to_vec();
                if let Some(e) = next.last_mut() {
                    *e = bumped;
                }
                Ok(IntegerSequence::new(next))
            }
        }
    }
}

/// Sum first, lexicographic second.
///
/// Zero padding keeps the sum, so every sum class is infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SumFirstLexicographicOrder;

impl SumFirstLexicographicOrder {
    pub fn compare(x: &IntegerSequence, y: &IntegerSequence) -> Ordering {
        x.sum().cmp(&y.sum()).then_with(|| x.as_slice().cmp(y.as_slice()))
    }
}

impl OrderRelation for SumFirstLexicographicOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        "sum-first-lexicographic"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(Self::compare(x, y).is_lt())
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        Ok(append_zero(x))
    }
}
