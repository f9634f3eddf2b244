//! Augmented interval index built on the red-black machinery.

pub mod map;
pub mod node;

pub use map::IntervalMap;
pub use node::{IntervalNode, MaxAugment};
