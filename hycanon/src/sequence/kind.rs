use num_bigint::BigUint;
use strum::{Display, EnumIs, EnumIter, EnumString, IntoStaticStr};

use super::{
    AdjustedSumOrder, CantorTuplingOrder, FixedWidthSentinelOrder, GodelOrder, IntegerSequence,
    LengthFirstLexicographicOrder, LexicographicOrder, RefinedGodelOrder,
    SumFirstLexicographicOrder,
};
use crate::{error::Result, order::OrderRelation};

/// Every order over [`IntegerSequence`], selectable by name.
///
/// ```
/// # use hycanon::sequence::SequenceOrder;
/// # use std::str::FromStr;
/// let order = SequenceOrder::from_str("refined-godel").unwrap();
/// assert_eq!(order, SequenceOrder::RefinedGodel);
/// assert_eq!(SequenceOrder::default().to_string(), "adjusted-sum");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIs,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SequenceOrder {
    Lexicographic,
    LengthFirstLexicographic,
    SumFirstLexicographic,
    #[default]
    AdjustedSum,
    Godel,
    RefinedGodel,
    /// Packed fields of [`DEFAULT_FIELD_WIDTH`](super::DEFAULT_FIELD_WIDTH) bits.
    FixedWidthSentinel,
    CantorTupling,
}

macro_rules! dispatch {
    ($self:expr, $order:ident => $body:expr) => {
        match $self {
            SequenceOrder::Lexicographic => {
                let $order = LexicographicOrder;
                $body
            }
            SequenceOrder::LengthFirstLexicographic => {
                let $order = LengthFirstLexicographicOrder;
                $body
            }
            SequenceOrder::SumFirstLexicographic => {
                let $order = SumFirstLexicographicOrder;
                $body
            }
            SequenceOrder::AdjustedSum => {
                let $order = AdjustedSumOrder;
                $body
            }
            SequenceOrder::Godel => {
                let $order = GodelOrder;
                $body
            }
            SequenceOrder::RefinedGodel => {
                let $order = RefinedGodelOrder;
                $body
            }
            SequenceOrder::FixedWidthSentinel => {
                let $order = FixedWidthSentinelOrder::default();
                $body
            }
            SequenceOrder::CantorTupling => {
                let $order = CantorTuplingOrder;
                $body
            }
        }
    };
}

impl OrderRelation for SequenceOrder {
    type Element = IntegerSequence;

    fn name(&self) -> &'static str {
        (*self).into()
    }

    fn is_order_isomorphic_to_n(&self) -> bool {
        dispatch!(self, order => order.is_order_isomorphic_to_n())
    }

    fn relates(&self, x: &IntegerSequence, y: &IntegerSequence) -> Result<bool> {
        dispatch!(self, order => order.relates(x, y))
    }

    fn least_element(&self) -> IntegerSequence {
        dispatch!(self, order => order.least_element())
    }

    fn successor(&self, x: &IntegerSequence) -> Result<IntegerSequence> {
        dispatch!(self, order => order.successor(x))
    }

    fn rank(&self, x: &IntegerSequence) -> Result<BigUint> {
        dispatch!(self, order => order.rank(x))
    }

    fn unrank(&self, n: &BigUint) -> Result<IntegerSequence> {
        dispatch!(self, order => order.unrank(n))
    }
}
