//! Node trait definitions shared by the tree families.
//!
//! Nodes live in a caller-owned `Vec`-backed arena; every "pointer"
//! (`parent`, `left`, `right`) is an `Option<u32>` index into that arena.
//! All tree-manipulation functions take the arena as a slice and work with
//! indices, so the back-reference to the parent never owns anything.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node color of a red-black tree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Tree links (`p`, `l`, `r`) as arena indices.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
///
/// The payload is everything that travels with the logical entry when a
/// deletion relocates it (key and value for a plain map node; low, high
/// and value for an interval node). Links, color and derived fields stay
/// with the physical arena slot.
pub trait KvNode: Node {
    type Key;
    type Value;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;

    /// Exchanges the logical payloads of two nodes, leaving links and
    /// rebalancing state untouched.
    fn swap_payload(&mut self, other: &mut Self);
}

/// Red-black specific node behavior.
pub trait RbNodeLike: KvNode {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

/// Derived-data maintenance hooks for augmented trees.
///
/// The red-black machinery calls back through this trait so that an
/// augmented tree can keep per-node derived fields consistent across
/// rotations and splices. The plain map plugs in [`NoAugment`].
pub trait Augment<N> {
    /// Re-derives the node's augmentation from its own payload and its
    /// children. Called for the node that moved down first, then for the
    /// node that moved up, after every rotation.
    fn update(arena: &mut [N], i: u32);

    /// Runs after a freshly created node has been linked into the tree,
    /// before the insert-fixup.
    fn propagate_insert(arena: &mut [N], i: u32);

    /// Runs after a node has been spliced out, starting from the splice
    /// parent, before the delete-fixup.
    fn propagate_remove(arena: &mut [N], from: Option<u32>);
}

/// No-op augmentation for trees without derived per-node data.
pub struct NoAugment;

impl<N> Augment<N> for NoAugment {
    fn update(_arena: &mut [N], _i: u32) {}

    fn propagate_insert(_arena: &mut [N], _i: u32) {}

    fn propagate_remove(_arena: &mut [N], _from: Option<u32>) {}
}
