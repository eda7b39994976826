//! The common contract of every total order in this crate.
//!
//! An order is a stateless strategy object. Every order can compare two
//! values ([`OrderRelation::relates`]), name its least element and step to
//! the next value. Orders that are isomorphic to (ℕ, <) additionally expose
//! [`OrderRelation::rank`] and [`OrderRelation::unrank`], which are mutual
//! inverses; for them `successor(x) == unrank(rank(x) + 1)`.
//!
//! Some orders are injective encodings that are not onto ℕ (packed
//! fixed-width fields, Cantor tupling, plain Gödel numbers). They still
//! expose `rank`/`unrank`, but `unrank` fails with
//! [`Error::OutsideImage`](crate::error::Error::OutsideImage) on values that
//! are not the rank of anything, and [`OrderRelation::is_order_isomorphic_to_n`]
//! returns `false`.
use num_bigint::BigUint;

use crate::error::{Error, Result};

pub trait OrderRelation {
    /// Values ordered by this relation.
    type Element;

    /// Short, stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether `rank`/`unrank` form a bijection with (ℕ, <).
    ///
    /// When `true`, `successor(x) == unrank(rank(x) + 1)` for every `x`.
    fn is_order_isomorphic_to_n(&self) -> bool;

    /// Strict less-than: `x < y` under this order.
    fn relates(&self, x: &Self::Element, y: &Self::Element) -> Result<bool>;

    /// Smallest value under this order.
    fn least_element(&self) -> Self::Element;

    /// The immediate successor of `x`.
    fn successor(&self, x: &Self::Element) -> Result<Self::Element>;

    /// Position of `x` in the enumeration of this order.
    fn rank(&self, x: &Self::Element) -> Result<BigUint> {
        let _ = x;
        Err(Error::RankUnsupported { order: self.name() })
    }

    /// Inverse of [`OrderRelation::rank`].
    fn unrank(&self, n: &BigUint) -> Result<Self::Element> {
        let _ = n;
        Err(Error::RankUnsupported { order: self.name() })
    }

    /// `x <= y` under this order, given that equality is value equality.
    fn relates_or_equal(&self, x: &Self::Element, y: &Self::Element) -> Result<bool>
    where
        Self::Element: PartialEq,
    {
        Ok(x == y || self.relates(x, y)?)
    }

    /// Checked variant of [`OrderRelation::unrank`] for signed inputs.
    fn unrank_signed(&self, n: i64) -> Result<Self::Element> {
        let n = u64::try_from(n).map_err(|_| Error::NegativeRank { value: n })?;
        self.unrank(&BigUint::from(n))
    }
}

/// Lazy enumeration of an order starting at `start`, in ascending order.
///
/// The iterator is infinite for orders without a greatest element and stops
/// at the first `successor` failure.
pub struct Ascending<'a, O: OrderRelation> {
    order: &'a O,
    next: Option<O::Element>,
}

impl<'a, O: OrderRelation> Ascending<'a, O> {
    pub fn new(order: &'a O, start: O::Element) -> Self {
        Self {
            order,
            next: Some(start),
        }
    }

    pub fn from_least(order: &'a O) -> Self {
        Self::new(order, order.least_element())
    }
}

impl<O: OrderRelation> Iterator for Ascending<'_, O>
where
    O::Element: Clone,
{
    type Item = O::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.order.successor(&current).ok();
        Some(current)
    }
}
