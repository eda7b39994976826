//! Hash-consing registries.
//!
//! There is one process-wide [`Interner`] per structural type
//! ([`IntegerSequence`](crate::sequence::IntegerSequence),
//! [`PlaneTree`](crate::tree::PlaneTree) and
//! [`LabeledTree`](crate::labeled::LabeledTree)). Every validating
//! constructor hands its freshly built node to the registry, which returns
//! the already-live instance with the same content if there is one. Two
//! values built independently from identical content are therefore the same
//! allocation, and equality is a pointer comparison in the common case.
//!
//! Registries grow monotonically. [`reset`] exists for callers that need
//! bounded memory; handles obtained before a reset stay valid but are no
//! longer identical to values built afterwards (equality then falls back to
//! a structural comparison).
use std::{collections::HashMap, fmt::Display, sync::Arc};

use log::{debug, info, warn};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use smallvec::{SmallVec, smallvec};

use crate::error::{Error, Result};

/// A node that can be stored in an [`Interner`].
///
/// `structural_hash` must only depend on content, and two nodes that compare
/// equal must have the same structural hash.
pub(crate) trait Internable: Eq + Display + Send + Sync + 'static {
    fn structural_hash(&self) -> u64;
}

/// An interning arena indexed by structural hash.
///
/// Buckets are small vectors: distinct values sharing a 64-bit hash are kept
/// side by side and told apart by content comparison.
pub(crate) struct Interner<T> {
    name: &'static str,
    buckets: RwLock<HashMap<u64, SmallVec<[Arc<T>; 1]>>>,
}

impl<T: Internable> Interner<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            buckets: Default::default(),
        }
    }

    fn lookup(bucket: &[Arc<T>], value: &T, name: &'static str, hash: u64) -> Option<Arc<T>> {
        let mut found: Option<&Arc<T>> = None;
        for candidate in bucket.iter().filter(|candidate| ***candidate == *value) {
            if found.is_some() {
                // Two live instances with equal content break every identity-based
                // answer handed out so far.
                panic!("{}", Error::RegistryCorruption { registry: name, hash });
            }
            found = Some(candidate);
        }
        found.cloned()
    }

    /// Return the live instance equal to `value`, inserting `value` if none exists.
    ///
    /// # A note on concurrency
    ///  1) Hits only take a shared lock, so concurrent lookups never block each other.
    ///  2) Misses take an upgradable lock and look again before upgrading. Only one
    ///     thread at a time may hold the upgradable lock, which makes the
    ///     check-then-insert atomic: two threads interning equal values always
    ///     receive the same instance.
    pub fn intern(&self, value: T) -> Arc<T> {
        let hash = value.structural_hash();

        if let Some(bucket) = self.buckets.read().get(&hash) {
            if let Some(found) = Self::lookup(bucket, &value, self.name, hash) {
                return found;
            }
        }

        let buckets = self.buckets.upgradable_read();
        if let Some(bucket) = buckets.get(&hash) {
            if let Some(found) = Self::lookup(bucket, &value, self.name, hash) {
                return found;
            }
        }

        let mut buckets = RwLockUpgradableReadGuard::upgrade(buckets);
        let value = Arc::new(value);
        if let Some(bucket) = buckets.get_mut(&hash) {
            info!(
                "Detected an hash collision in registry `{}` on hash 0x{:016x}. The following values collided:\n{}\n - {}",
                self.name,
                hash,
                bucket
                    .iter()
                    .map(|other| format!(" - {other}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                value,
            );
            bucket.push(value.clone());
        } else {
            debug!(
                "New value encountered in registry `{}`: {}. Registered under hash 0x{:016x}.",
                self.name, value, hash
            );
            buckets.insert(hash, smallvec![value.clone()]);
        }
        value
    }

    /// Number of live interned values.
    pub fn len(&self) -> usize {
        self.buckets.read().values().map(|bucket| bucket.len()).sum()
    }

    pub fn clear(&self) {
        let mut buckets = self.buckets.write();
        warn!(
            "Resetting registry `{}` ({} bucket(s)). Previously returned handles lose identity with new values.",
            self.name,
            buckets.len()
        );
        buckets.clear();
    }

    /// Verify that every bucket is filed under the right hash and holds pairwise distinct values.
    pub fn check_integrity(&self) -> Result<()> {
        let buckets = self.buckets.read();
        for (&hash, bucket) in buckets.iter() {
            let corrupted = Error::RegistryCorruption {
                registry: self.name,
                hash,
            };
            for (i, value) in bucket.iter().enumerate() {
                if value.structural_hash() != hash {
                    return Err(corrupted);
                }
                if bucket[i + 1..].iter().any(|other| **other == **value) {
                    return Err(corrupted);
                }
            }
        }
        Ok(())
    }
}

/// Live value counts, one per registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegistryStats {
    pub sequences: usize,
    pub trees: usize,
    pub labeled_trees: usize,
}

impl RegistryStats {
    pub fn total(&self) -> usize {
        self.sequences + self.trees + self.labeled_trees
    }
}

pub fn stats() -> RegistryStats {
    RegistryStats {
        sequences: crate::sequence::registry().len(),
        trees: crate::tree::registry().len(),
        labeled_trees: crate::labeled::registry().len(),
    }
}

/// Empty every registry.
///
/// Labeled trees are dropped first so that their components are released
/// bottom-up.
pub fn reset() {
    crate::labeled::registry().clear();
    crate::tree::registry().clear();
    crate::sequence::registry().clear();
}

/// Scan every registry for a broken one-instance-per-value invariant.
pub fn check_integrity() -> Result<()> {
    crate::sequence::registry().check_integrity()?;
    crate::tree::registry().check_integrity()?;
    crate::labeled::registry().check_integrity()
}
