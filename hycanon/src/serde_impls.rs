//! Serialization through the validating constructors.
//!
//! - [`IntegerSequence`]: flat list of naturals.
//! - [`PlaneTree`]: nested lists, a node being the list of its children.
//! - [`LabeledTree`]: the pair `(tree_as_nested_lists, sequence_as_flat_list)`.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::{
    labeled::LabeledTree,
    sequence::IntegerSequence,
    tree::{PlaneTree, Shape},
};

impl Serialize for IntegerSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for IntegerSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<u64>::deserialize(deserializer).map(IntegerSequence::from)
    }
}

impl Serialize for PlaneTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_shape().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlaneTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Shape::deserialize(deserializer).map(|shape| PlaneTree::from_shape(&shape))
    }
}

impl Serialize for LabeledTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.tree(), self.sequence()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LabeledTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tree, sequence) = <(PlaneTree, IntegerSequence)>::deserialize(deserializer)?;
        LabeledTree::new(tree, sequence).map_err(D::Error::custom)
    }
}
