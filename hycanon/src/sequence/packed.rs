//! Injective encodings that leave gaps in ℕ.
//!
//! Both orders below rank cheaply and their `unrank` rejects the gaps with
//! [`Error::OutsideImage`]. Their successor skips the gaps.
use num_bigint::BigUint;

use super::IntegerSequence;
use crate::{
    combinatorics::{cantor_tupling, cantor_tupling_inverse, is_zero, one},
    error::{Error, Result},
    order::OrderRelation,
};

/// Field width used by [`FixedWidthSentinelOrder::default`].
pub const DEFAULT_FIELD_WIDTH: u32 = 32;

/// Packs every element into a `width`-bit field behind a leading `1` bit.
///
/// `()` is `0`; `(s_0, ..., s_(l-1))` is the binary number
/// `1 ‖ s_0 ‖ ... ‖ s_(l-1)`. With the default width `(0,)` is `2^32`.
/// Elements must fit in the field width. The induced order is length
/// first, then lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedWidthSentinelOrder {
    width: u32,
}

impl Default for FixedWidthSentinelOrder {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_WIDTH)
    }
}

impl FixedWidthSentinelOrder {
    const NAME: &'static str = "fixed-width-sentinel";

    /// # Panics
    /// When `width` is not in `1..=64`.
    pub const fn new(width: u32) -> Self {
        assert!(width >= 1 && width <= 64, "field width must be in 1..=64");
        Self { width }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Largest value a field can hold.
    pub const fn field_max(&self) -> u64 {
        u64::MAX >> (64 - self.width)
    }

    fn check(&self, value: u64) -> Result<u64> {
        if value > self.field_max() {
            return Err(Error::ElementTooWide {
                value,
                width: self.width,
            });
        }
        Ok(value)
    }
}

impl OrderRelation for FixedWidthSentinelOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(self.rank(x)? < self.rank(y)?)
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    /// Increments the fields as a base-`2^width` counter; when every field
    /// overflows, moves on to the all-zero sequence one element longer.
    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        let mut fields = x
            .iter()
            .map(|e| self.check(e))
            .collect::<Result<Vec<_>>>()?;
        for field in fields.iter_mut().rev() {
            if *field < self.field_max() {
                *field += 1;
                return Ok(IntegerSequence::new(fields));
            }
            *field = 0;
        }
        Ok(IntegerSequence::new(std::iter::repeat_n(0, x.len() + 1)))
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        if x.is_empty() {
            return Ok(BigUint::default());
        }
        let mut n = one();
        for e in x.iter() {
            n = (n << self.width) | BigUint::from(self.check(e)?);
        }
        Ok(n)
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        if is_zero(n) {
            return Ok(IntegerSequence::empty());
        }
        let payload_bits = n.bits() - 1;
        let width = self.width as u64;
        if payload_bits == 0 || payload_bits % width != 0 {
            return Err(Error::OutsideImage {
                order: Self::NAME,
                rank: n.to_string(),
            });
        }

        let mask = BigUint::from(self.field_max());
        let length = payload_bits / width;
        let elements = (0..length)
            .map(|i| {
                let field: BigUint = (n >> ((length - 1 - i) * width)) & &mask;
                u64::try_from(&field).map_err(|_| Error::OutsideImage {
                    order: Self::NAME,
                    rank: n.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(IntegerSequence::new(elements))
    }
}

/// Ranks a sequence by its Cantor tuple code (see
/// [`cantor_tupling`](crate::combinatorics::cantor_tupling)).
///
/// Injective; codes whose length sentinel is `0` but whose payload is not are
/// outside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CantorTuplingOrder;

impl CantorTuplingOrder {
    const NAME: &'static str = "cantor-tupling";
}

impl OrderRelation for CantorTuplingOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(cantor_tupling(x.as_slice()) < cantor_tupling(y.as_slice()))
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        let mut n = cantor_tupling(x.as_slice());
        loop {
            n += 1u8;
            match self.unrank(&n) {
                Err(Error::OutsideImage { .. }) => continue,
                other => return other,
            }
        }
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        Ok(cantor_tupling(x.as_slice()))
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        let elements = cantor_tupling_inverse(n)?;
        let elements = elements
            .iter()
            .map(|e| u64::try_from(e).map_err(|_| Error::RankOverflow { order: Self::NAME }))
            .collect::<Result<Vec<_>>>()?;
        Ok(IntegerSequence::new(elements))
    }
}
