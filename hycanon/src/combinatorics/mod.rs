//! Memoized combinatorial counts shared by the orders.
//!
//! Every table in this module is process-wide, guarded by a
//! [`parking_lot::RwLock`], and grows monotonically until
//! [`clear_caches`] is called. Lookups take a shared lock; misses compute
//! outside of any lock and publish the result afterwards, so concurrent
//! callers may race to compute the same entry but always observe identical
//! values.
use std::collections::HashMap;

use log::trace;
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

pub mod cantor;
pub mod primes;

pub use cantor::{
    MAX_TUPLE_LENGTH, cantor_pairing, cantor_pairing_inverse, cantor_tupling, cantor_tupling_inverse,
};
pub use primes::{factorize, nth_prime};

static BINOMIALS: Lazy<RwLock<HashMap<(u64, u64), BigUint>>> = Lazy::new(Default::default);
static CATALAN: Lazy<RwLock<Vec<BigUint>>> = Lazy::new(|| RwLock::new(vec![BigUint::from(1u8)]));
static BELL: Lazy<RwLock<Vec<BigUint>>> = Lazy::new(|| RwLock::new(vec![BigUint::from(1u8)]));

#[inline]
pub(crate) fn is_zero(n: &BigUint) -> bool {
    n.bits() == 0
}

#[inline]
pub(crate) fn one() -> BigUint {
    BigUint::from(1u8)
}

/// `2^e`.
#[inline]
pub fn pow2(e: u64) -> BigUint {
    one() << e
}

/// Binomial coefficient `C(n, k)`; zero when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::default();
    }
    let k = k.min(n - k);
    if k == 0 {
        return one();
    }
    if k == 1 {
        return BigUint::from(n);
    }

    if let Some(value) = BINOMIALS.read().get(&(n, k)) {
        return value.clone();
    }

    // C(n, k) = prod_{i=1..k} (n - k + i) / i, every partial quotient is exact.
    let mut value = one();
    for i in 1..=k {
        value *= n - k + i;
        value /= i;
    }

    trace!("Memoized C({n}, {k}) ({} bits).", value.bits());
    BINOMIALS.write().insert((n, k), value.clone());
    value
}

/// Number of compositions of `m` into `k` positive parts, `C(m - 1, k - 1)`.
pub fn compositions(m: u64, k: u64) -> BigUint {
    match (m, k) {
        (0, 0) => one(),
        (_, 0) | (0, _) => BigUint::default(),
        (m, k) => binomial(m - 1, k - 1),
    }
}

/// The `n`-th Catalan number (`1, 1, 2, 5, 14, ...`).
pub fn catalan(n: u64) -> BigUint {
    let index = n as usize;
    {
        let table = CATALAN.read();
        if let Some(value) = table.get(index) {
            return value.clone();
        }
    }

    let mut table = CATALAN.write();
    while table.len() <= index {
        // C(i + 1) = C(i) * 2 (2i + 1) / (i + 2)
        let i = (table.len() - 1) as u64;
        let next = &table[i as usize] * (2 * (2 * i + 1)) / (i + 2);
        table.push(next);
    }
    trace!("Catalan table grown to {} entries.", table.len());
    table[index].clone()
}

/// `C(0) + C(1) + ... + C(n - 1)`, the number of plane trees with fewer than `n + 1` nodes.
pub fn catalan_prefix_sum(n: u64) -> BigUint {
    let mut total = BigUint::default();
    for i in 0..n {
        total += catalan(i);
    }
    total
}

/// The `n`-th Bell number (`1, 1, 2, 5, 15, 52, ...`): the number of
/// restricted-growth sequences of length `n`.
pub fn bell(n: u64) -> BigUint {
    let index = n as usize;
    {
        let table = BELL.read();
        if let Some(value) = table.get(index) {
            return value.clone();
        }
    }

    let mut table = BELL.write();
    while table.len() <= index {
        // B(m + 1) = sum_k C(m, k) B(k)
        let m = (table.len() - 1) as u64;
        let mut next = BigUint::default();
        for k in 0..=m {
            next += binomial(m, k) * &table[k as usize];
        }
        table.push(next);
    }
    trace!("Bell table grown to {} entries.", table.len());
    table[index].clone()
}

/// Drop every memoized value (binomials, Catalan and Bell numbers, primes).
pub fn clear_caches() {
    BINOMIALS.write().clear();
    CATALAN.write().truncate(1);
    BELL.write().truncate(1);
    primes::clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(0, 0), BigUint::from(1u8));
        assert_eq!(binomial(5, 2), BigUint::from(10u8));
        assert_eq!(binomial(5, 3), BigUint::from(10u8));
        assert_eq!(binomial(3, 5), BigUint::default());
        assert_eq!(binomial(52, 5), BigUint::from(2_598_960u32));
    }

    #[test]
    fn compositions_match_stars_and_bars() {
        assert_eq!(compositions(0, 0), one());
        assert_eq!(compositions(3, 0), BigUint::default());
        assert_eq!(compositions(4, 2), BigUint::from(3u8));
        assert_eq!(compositions(2, 3), BigUint::default());
    }

    #[test]
    fn catalan_and_bell_prefixes() {
        let catalans: Vec<u64> = (0..8).map(|n| u64::try_from(&catalan(n)).unwrap()).collect();
        assert_eq!(catalans, vec![1, 1, 2, 5, 14, 42, 132, 429]);

        let bells: Vec<u64> = (0..8).map(|n| u64::try_from(&bell(n)).unwrap()).collect();
        assert_eq!(bells, vec![1, 1, 2, 5, 15, 52, 203, 877]);

        assert_eq!(catalan_prefix_sum(0), BigUint::default());
        assert_eq!(catalan_prefix_sum(3), BigUint::from(4u8));
    }
}
