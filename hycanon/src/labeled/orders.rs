//! Orders over labeled trees.
use num_bigint::BigUint;
use smallvec::SmallVec;

use super::LabeledTree;
use crate::{
    combinatorics::{cantor_pairing, cantor_pairing_inverse, is_zero},
    error::{Error, Result},
    order::OrderRelation,
    sequence::{AdjustedSumOrder, IntegerSequence},
    tree::DyckWordOrder,
};

/// Ranks a tree through its meta-sequence
/// `(main_element, rank(s_0), rank(s_1), ...)`, where `s_i` are the
/// immediate subtrees, under a sequence order `O`:
///
/// `rank(t) = O.rank(meta(t)) - 1`.
///
/// The meta-sequence is never empty, hence the shift by one. `O` must be
/// isomorphic to (ℕ, <) with the empty sequence ranked `0`; both
/// [`AdjustedSumOrder`] (the default) and
/// [`RefinedGodelOrder`](crate::sequence::RefinedGodelOrder) qualify. The
/// least tree is the leaf labeled `0`.
///
/// Ranks grow very fast with depth: a subtree whose rank exceeds `u64::MAX`
/// cannot be stored in a meta-sequence and ranking fails with
/// [`Error::RankOverflow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RecursiveSequenceOrder<O = AdjustedSumOrder> {
    sequence_order: O,
}

impl RecursiveSequenceOrder {
    /// Meta-sequences ranked by the canonical [`AdjustedSumOrder`].
    pub const fn canonical() -> Self {
        Self {
            sequence_order: AdjustedSumOrder,
        }
    }
}

impl<O> RecursiveSequenceOrder<O>
where
    O: OrderRelation<Element = IntegerSequence>,
{
    pub fn new(sequence_order: O) -> Self {
        Self { sequence_order }
    }

    pub fn sequence_order(&self) -> &O {
        &self.sequence_order
    }

    fn overflow(&self) -> Error {
        Error::RankOverflow {
            order: self.name(),
        }
    }
}

impl<O> OrderRelation for RecursiveSequenceOrder<O>
where
    O: OrderRelation<Element = IntegerSequence>,
{
    type Element = LabeledTree;

    fn name(&self) -> &'static str {
        "recursive-sequence"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        self.sequence_order.is_order_isomorphic_to_n()
    }

    fn relates(&self, x: &LabeledTree, y: &LabeledTree) -> Result<bool> {
        Ok(self.rank(x)? < self.rank(y)?)
    }

    fn least_element(&self) -> LabeledTree {
        LabeledTree::leaf(0)
    }

    fn successor(&self, x: &LabeledTree) -> Result<LabeledTree> {
        self.unrank(&(self.rank(x)? + 1u8))
    }

    /// Post-order: the ranks of the immediate subtrees are known when a node is left.
    fn rank(&self, x: &LabeledTree) -> Result<BigUint> {
        enum Frame<'a> {
            Enter(&'a LabeledTree),
            Exit(&'a LabeledTree),
        }

        let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
        let mut ranks: SmallVec<[u64; 16]> = SmallVec::new();
        let mut root_rank = BigUint::default();
        stack.push(Frame::Enter(x));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(tree) => {
                    stack.push(Frame::Exit(tree));
                    for child in tree.immediate_subtrees().iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(tree) => {
                    let start = ranks.len() - tree.degree();
                    let meta = IntegerSequence::new(
                        std::iter::once(tree.main_element().value()).chain(ranks.drain(start..)),
                    );
                    let rank = self.sequence_order.rank(&meta)?;
                    if is_zero(&rank) {
                        // Only the empty sequence may rank 0.
                        return Err(Error::OutsideImage {
                            order: self.name(),
                            rank: rank.to_string(),
                        });
                    }
                    let rank = rank - 1u8;
                    if stack.is_empty() {
                        root_rank = rank;
                    } else {
                        ranks.push(u64::try_from(&rank).map_err(|_| self.overflow())?);
                    }
                }
            }
        }

        Ok(root_rank)
    }

    fn unrank(&self, n: &BigUint) -> Result<LabeledTree> {
        enum Frame {
            Enter(BigUint),
            Exit { label: u64, degree: usize },
        }

        let mut stack: Vec<Frame> = vec![Frame::Enter(n.clone())];
        let mut built: SmallVec<[LabeledTree; 16]> = SmallVec::new();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(rank) => {
                    let meta = self.sequence_order.unrank(&(&rank + 1u8))?;
                    let Some((&label, children)) = meta.as_slice().split_first() else {
                        return Err(Error::OutsideImage {
                            order: self.name(),
                            rank: rank.to_string(),
                        });
                    };
                    stack.push(Frame::Exit {
                        label,
                        degree: children.len(),
                    });
                    for &child in children.iter().rev() {
                        let child = BigUint::from(child);
                        // Subtree ranks strictly decrease, which bounds the walk.
                        if child >= rank {
                            return Err(Error::OutsideImage {
                                order: self.name(),
                                rank: rank.to_string(),
                            });
                        }
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit { label, degree } => {
                    let start = built.len() - degree;
                    let children: SmallVec<[LabeledTree; 4]> = built.drain(start..).collect();
                    built.push(LabeledTree::from_immediate_subtrees(label, children));
                }
            }
        }

        built.pop().ok_or_else(|| self.overflow())
    }
}

/// Pairs the shape rank with the label rank: `π(shape, labels)`.
///
/// The shape is ranked by [`DyckWordOrder`]; the labels by
/// [`AdjustedSumOrder::rank_within_length`], i.e. among sequences of the
/// tree's size. Both components are bijective, so the pairing is a
/// bijection with ℕ. Unlike [`RecursiveSequenceOrder`], the two parts can
/// be recovered independently with [`CantorPairingOrder::split`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CantorPairingOrder;

impl CantorPairingOrder {
    /// `(shape rank, label rank)` of `x`.
    pub fn split(x: &LabeledTree) -> Result<(BigUint, BigUint)> {
        Ok((
            DyckWordOrder.rank(x.tree())?,
            AdjustedSumOrder::rank_within_length(x.sequence())?,
        ))
    }
}

impl OrderRelation for CantorPairingOrder {
    type Element = LabeledTree;

    fn name(&self) -> &'static str {
        "cantor-pairing"
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        true
    }

    fn relates(&self, x: &LabeledTree, y: &LabeledTree) -> Result<bool> {
        Ok(self.rank(x)? < self.rank(y)?)
    }

    fn least_element(&self) -> LabeledTree {
        LabeledTree::leaf(0)
    }

    fn successor(&self, x: &LabeledTree) -> Result<LabeledTree> {
        self.unrank(&(self.rank(x)? + 1u8))
    }

    fn rank(&self, x: &LabeledTree) -> Result<BigUint> {
        let (shape, labels) = Self::split(x)?;
        Ok(cantor_pairing(&shape, &labels))
    }

    fn unrank(&self, n: &BigUint) -> Result<LabeledTree> {
        let (shape, labels) = cantor_pairing_inverse(n);
        let tree = DyckWordOrder.unrank(&shape)?;
        let sequence = AdjustedSumOrder::unrank_within_length(&labels, tree.size())?;
        LabeledTree::new(tree, sequence)
    }
}
