//! Gödel-number encodings over the ascending primes.
use num_bigint::BigUint;

use super::IntegerSequence;
use crate::{
    combinatorics::{factorize, is_zero, nth_prime, one},
    error::{Error, Result},
    order::OrderRelation,
};

fn prime_power(index: usize, exponent: u64, order: &'static str) -> Result<BigUint> {
    let exponent = u32::try_from(exponent).map_err(|_| Error::RankOverflow { order })?;
    Ok(BigUint::from(nth_prime(index)).pow(exponent))
}

/// `∏ p_i^(s_i)`. Not injective: trailing zeros vanish, so `(1,)` and `(1, 0)`
/// share the number `2`. `unrank` returns the shortest preimage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GodelOrder;

impl GodelOrder {
    const NAME: &'static str = "godel";

    pub fn godel_number(x: &IntegerSequence) -> Result<BigUint> {
        let mut n = one();
        for (i, e) in x.iter().enumerate() {
            n *= prime_power(i, e, Self::NAME)?;
        }
        Ok(n)
    }
}

impl OrderRelation for GodelOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        false
    }

    /// Compares Gödel numbers; sequences sharing a number are unrelated.
    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(Self::godel_number(x)? < Self::godel_number(y)?)
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    /// Shortest preimage of the next Gödel number.
    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        self.unrank(&(Self::godel_number(x)? + 1u8))
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        Self::godel_number(x)
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        if is_zero(n) {
            return Err(Error::OutsideImage {
                order: Self::NAME,
                rank: n.to_string(),
            });
        }
        Ok(IntegerSequence::new(factorize(n)))
    }
}

/// Gödel numbering with the last exponent raised by one, shifted so that the
/// empty sequence is `0`. Bijective with ℕ:
///
/// `rank(s) = p_0^(s_0) ⋯ p_(l-1)^(s_(l-1) + 1) − 1`.
///
/// `unrank` factorizes `n + 1` by trial division over the lazily extended
/// prime table and lowers the last exponent back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RefinedGodelOrder;

impl RefinedGodelOrder {
    const NAME: &'static str = "refined-godel";
}

impl OrderRelation for RefinedGodelOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        true
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        Ok(self.rank(x)? < self.rank(y)?)
    }

    fn least_element(&self) -> IntegerSequence {
        IntegerSequence::empty()
    }

    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        self.unrank(&(self.rank(x)? + 1u8))
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        let Some(last_index) = x.len().checked_sub(1) else {
            return Ok(BigUint::default());
        };
        let mut n = one();
        for (i, e) in x.iter().enumerate() {
            let e = if i == last_index {
                e.checked_add(1).ok_or(Error::RankOverflow { order: Self::NAME })?
            } else {
                e
            };
            n *= prime_power(i, e, Self::NAME)?;
        }
        Ok(n - 1u8)
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        let mut exponents = factorize(&(n + 1u8));
        if let Some(last) = exponents.last_mut() {
            *last -= 1;
        }
        Ok(IntegerSequence::new(exponents))
    }
}
