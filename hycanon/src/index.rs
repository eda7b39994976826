//! Natural-number labels.
//!
//! Role
//! - 0-based natural number used as a node label or as a pointer to a tree position.
//! - Being `Copy`, a value is its own canonical representative; no registry is involved.
use num_bigint::BigUint;

use crate::error::{Error, Result};

/// A 0-based natural number.
///
/// Conversions from signed integers are checked and fail with
/// [`Error::NegativeElement`]; conversions from unsigned integers are free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct NaturalIndex(u64);

impl NaturalIndex {
    pub const ZERO: NaturalIndex = NaturalIndex(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Checked conversion of a signed value found at position `index` of some input.
    pub fn try_from_signed(index: usize, value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(NaturalIndex)
            .map_err(|_| Error::NegativeElement { index, value })
    }
}

// ===== Conversions =====

impl From<u64> for NaturalIndex {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for NaturalIndex {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

impl From<NaturalIndex> for u64 {
    fn from(value: NaturalIndex) -> Self {
        value.0
    }
}

impl From<NaturalIndex> for BigUint {
    fn from(value: NaturalIndex) -> Self {
        BigUint::from(value.0)
    }
}

impl TryFrom<i64> for NaturalIndex {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::try_from_signed(0, value)
    }
}

impl std::fmt::Display for NaturalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
