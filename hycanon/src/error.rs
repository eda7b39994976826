use strum::{Display, EnumIs};
use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, Display)]
pub enum ErrorKind {
    /// Input rejected at construction time.
    Validation,
    /// Request outside of what an order (or a view) can answer.
    Domain,
    /// Broken identity-by-interning contract. Never recoverable.
    InternalInvariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// The sequence attached to a tree must label every node exactly once.
    #[error(
        "Labeled tree data validation failed: the tree has {tree_size} node(s) but the sequence has {sequence_length} element(s)."
    )]
    LengthMismatch {
        tree_size: usize,
        sequence_length: usize,
    },

    /// Labels and sequence elements are natural numbers.
    #[error(
        "Element at index {index} is negative ({value}). Sequence elements must be natural numbers."
    )]
    NegativeElement { index: usize, value: i64 },

    /// A string that is not a primitive balanced parenthesis word.
    #[error(
        "Invalid Dyck word: unexpected character or unbalanced parenthesis at position {position}. Expected a single primitive word such as `(()())`."
    )]
    InvalidDyckWord { position: usize },

    /// A child index along a path does not exist.
    #[error("Invalid path {path:?}: no child at depth {depth}.")]
    InvalidPath { path: Vec<usize>, depth: usize },

    /// The tree does not have the shape of an abstract map.
    #[error(
        "Labeled tree `{tree}` is not an abstract map: expected degree 2, equal arity of preimage and image, and unique preimage elements."
    )]
    NotAnAbstractMap { tree: String },

    /// The tree does not have the shape of an abstract inference rule.
    #[error(
        "Labeled tree `{tree}` is not an abstract inference rule: expected degree 3 (variables, premises, conclusion)."
    )]
    NotAnInferenceRule { tree: String },

    /// A substitution map received the same key twice with different values.
    #[error("Duplicate substitution key `{key}` with conflicting values.")]
    DuplicateKey { key: String },

    /// The order is not ℕ-isomorphic and does not expose rank/unrank.
    #[error("The `{order}` order does not support ranking.")]
    RankUnsupported { order: &'static str },

    /// `unrank` was called with a value that is not the rank of any element.
    #[error("Rank {rank} is outside the image of the `{order}` order.")]
    OutsideImage { order: &'static str, rank: String },

    /// An element does not fit in the fixed-width field of a packed encoding.
    #[error("Element {value} does not fit in a {width}-bit field.")]
    ElementTooWide { value: u64, width: u32 },

    /// An intermediate rank no longer fits in a sequence element.
    #[error(
        "Rank computation under the `{order}` order overflowed: an intermediate rank does not fit in a 64-bit sequence element."
    )]
    RankOverflow { order: &'static str },

    /// Ranks are natural numbers.
    #[error("Rank {value} is negative. Ranks must be natural numbers.")]
    NegativeRank { value: i64 },

    /// The registry holds two distinct live instances of the same value, or an
    /// instance filed under the wrong structural hash.
    #[error(
        "Registry `{registry}` is corrupted at hash 0x{hash:016x}: the one-instance-per-value invariant does not hold."
    )]
    RegistryCorruption { registry: &'static str, hash: u64 },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LengthMismatch { .. }
            | Error::NegativeElement { .. }
            | Error::InvalidDyckWord { .. }
            | Error::InvalidPath { .. }
            | Error::NotAnAbstractMap { .. }
            | Error::NotAnInferenceRule { .. }
            | Error::DuplicateKey { .. } => ErrorKind::Validation,
            Error::RankUnsupported { .. }
            | Error::OutsideImage { .. }
            | Error::ElementTooWide { .. }
            | Error::RankOverflow { .. }
            | Error::NegativeRank { .. } => ErrorKind::Domain,
            Error::RegistryCorruption { .. } => ErrorKind::InternalInvariant,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
