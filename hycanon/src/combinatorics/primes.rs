//! Lazily generated prime table and trial-division factorization.
use log::trace;
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use super::is_zero;

static PRIMES: Lazy<RwLock<Vec<u64>>> = Lazy::new(|| RwLock::new(vec![2, 3]));

/// The `index`-th prime, 0-based (`nth_prime(0) == 2`).
pub fn nth_prime(index: usize) -> u64 {
    if let Some(&p) = PRIMES.read().get(index) {
        return p;
    }

    let table = PRIMES.upgradable_read();
    if let Some(&p) = table.get(index) {
        return p;
    }
    let mut table = RwLockUpgradableReadGuard::upgrade(table);
    let mut candidate = table.last().copied().unwrap_or(1) + 2;
    while table.len() <= index {
        let is_prime = table
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0);
        if is_prime {
            table.push(candidate);
        }
        candidate += 2;
    }
    trace!("Prime table grown to {} entries.", table.len());
    table[index]
}

/// Exponents of `n` over the ascending primes, up to and including its
/// largest prime factor. `factorize(1)` is empty; `n` must not be zero.
///
/// ```
/// # use hycanon::combinatorics::factorize;
/// # use num_bigint::BigUint;
/// // 360 = 2^3 * 3^2 * 5
/// assert_eq!(factorize(&BigUint::from(360u32)), vec![3, 2, 1]);
/// // 14 = 2 * 7
/// assert_eq!(factorize(&BigUint::from(14u32)), vec![1, 0, 0, 1]);
/// ```
pub fn factorize(n: &BigUint) -> Vec<u64> {
    debug_assert!(!is_zero(n));
    let one = super::one();
    let mut remainder = n.clone();
    let mut exponents = Vec::new();
    let mut index = 0;
    while remainder > one {
        let p = nth_prime(index);
        let mut e = 0;
        while is_zero(&(&remainder % p)) {
            remainder /= p;
            e += 1;
        }
        exponents.push(e);
        index += 1;
    }
    exponents
}

pub(super) fn clear() {
    PRIMES.write().truncate(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_primes() {
        let primes: Vec<u64> = (0..10).map(nth_prime).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(nth_prime(999), 7919);
    }

    #[test]
    fn factorize_one_is_empty() {
        assert!(factorize(&BigUint::from(1u8)).is_empty());
        assert_eq!(factorize(&BigUint::from(2u8)), vec![1]);
    }
}
