//! Arena-based red-black tree structures: a balanced ordered map
//! ([`RbMap`]) and an augmented interval index ([`IntervalMap`]) that
//! answers stabbing ("which intervals contain point p") and overlap
//! ("which intervals overlap `[low, high]`") queries in
//! `O(log n + k)`.
//!
//! Instead of raw parent pointers, all tree links are `Option<u32>`
//! indices into a `Vec`-backed arena owned by the map. The red-black
//! insertion and six-case deletion fixups are shared between both
//! structures through the [`Augment`] hook, which the interval index
//! uses to keep its per-subtree `max` annotation consistent across
//! rotations and splices.
//!
//! Lookups and queries return arena indices which act as lightweight
//! accessors; they are invalidated by any mutating call.

pub mod error;
pub mod interval;
pub mod rb;
pub mod types;
pub mod util;

pub use error::InvariantError;
pub use interval::{IntervalMap, IntervalNode, MaxAugment};
pub use rb::{RbMap, RbNode};
pub use types::{Augment, Color, KvNode, NoAugment, Node, RbNodeLike};
pub use util::{first, last, next, prev, size};
