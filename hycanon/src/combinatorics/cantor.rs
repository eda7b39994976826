//! Cantor pairing and n-ary tupling.
//!
//! `π(x, y) = (x + y)(x + y + 1) / 2 + y` is a bijection ℕ² → ℕ. Its
//! inverse extracts the triangular root `w = ⌊(√(8n + 1) − 1) / 2⌋`.
//!
//! Tupling folds π left to right over the elements and pairs the result
//! with the length (the sentinel), which makes the length recoverable:
//!
//! | sequence          | code                      |
//! |-------------------|---------------------------|
//! | `()`              | `0`                       |
//! | `(a)`             | `π(a, 1)`                 |
//! | `(a, b)`          | `π(π(a, b), 2)`           |
//! | `(a, b, c, ...)`  | `π(π(π(a, b), c)..., l)`  |
use num_bigint::BigUint;

use super::is_zero;
use crate::error::{Error, Result};

pub fn cantor_pairing(x: &BigUint, y: &BigUint) -> BigUint {
    let w = x + y;
    let triangle = (&w * (&w + 1u8)) >> 1u8;
    triangle + y
}

pub fn cantor_pairing_inverse(n: &BigUint) -> (BigUint, BigUint) {
    let w = ((n * 8u8 + 1u8).sqrt() - 1u8) >> 1u8;
    let triangle = (&w * (&w + 1u8)) >> 1u8;
    let y = n - triangle;
    let x = w - &y;
    (x, y)
}

pub fn cantor_tupling(elements: &[u64]) -> BigUint {
    let length = BigUint::from(elements.len());
    match elements {
        [] => BigUint::default(),
        [a] => cantor_pairing(&BigUint::from(*a), &length),
        [a, b, rest @ ..] => {
            let mut code = cantor_pairing(&BigUint::from(*a), &BigUint::from(*b));
            for &element in rest {
                code = cantor_pairing(&code, &BigUint::from(element));
            }
            cantor_pairing(&code, &length)
        }
    }
}

/// Longest tuple [`cantor_tupling_inverse`] materializes.
pub const MAX_TUPLE_LENGTH: usize = 1 << 20;

const TUPLING: &str = "cantor-tupling";

/// Inverse of [`cantor_tupling`].
///
/// Codes whose length sentinel is `0` but whose payload is not are outside
/// the image ([`Error::OutsideImage`]). A sentinel above [`MAX_TUPLE_LENGTH`]
/// fails with [`Error::RankOverflow`] before anything is allocated.
pub fn cantor_tupling_inverse(n: &BigUint) -> Result<Vec<BigUint>> {
    let overflow = || Error::RankOverflow { order: TUPLING };
    let (mut code, length) = cantor_pairing_inverse(n);
    let length = usize::try_from(&length)
        .ok()
        .filter(|&l| l <= MAX_TUPLE_LENGTH)
        .ok_or_else(overflow)?;
    match length {
        0 if is_zero(&code) => Ok(Vec::new()),
        0 => Err(Error::OutsideImage {
            order: TUPLING,
            rank: n.to_string(),
        }),
        1 => Ok(vec![code]),
        _ => {
            let mut elements = Vec::new();
            elements.try_reserve_exact(length).map_err(|_| overflow())?;
            for _ in 0..length - 1 {
                let (x, y) = cantor_pairing_inverse(&code);
                elements.push(y);
                code = x;
            }
            elements.push(code);
            elements.reverse();
            Ok(elements)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn pairing_enumerates_diagonals() {
        let codes: Vec<BigUint> = [(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2)]
            .iter()
            .map(|&(x, y)| cantor_pairing(&big(x), &big(y)))
            .collect();
        assert_eq!(codes, (0..6).map(big).collect::<Vec<_>>());
        assert_eq!(cantor_pairing_inverse(&big(4)), (big(1), big(1)));
    }

    #[test]
    fn tupling_recovers_elements() {
        let cases: [&[u64]; 4] = [&[], &[7], &[3, 0], &[1, 2, 3, 4, 5]];
        for case in cases {
            let code = cantor_tupling(case);
            let decoded = cantor_tupling_inverse(&code).unwrap();
            assert_eq!(decoded, case.iter().map(|&e| big(e)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn tupling_gap_is_rejected() {
        // π(1, 0) = 1: payload 1 with length sentinel 0.
        assert!(cantor_tupling_inverse(&big(1)).unwrap_err().is_outside_image());
    }

    #[test]
    fn tupling_rejects_lengths_it_cannot_hold() {
        let code = cantor_pairing(&big(0), &(big(1) << 40u32));
        assert_eq!(
            cantor_tupling_inverse(&code).unwrap_err(),
            Error::RankOverflow { order: "cantor-tupling" }
        );
        let longest = cantor_pairing(&big(0), &big(MAX_TUPLE_LENGTH as u64));
        assert_eq!(cantor_tupling_inverse(&longest).unwrap().len(), MAX_TUPLE_LENGTH);
    }
}
