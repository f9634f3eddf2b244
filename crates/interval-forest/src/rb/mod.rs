//! Balanced ordered map: an arena-backed red-black tree.

pub mod map;
pub mod node;
pub mod util;

pub use map::RbMap;
pub use node::RbNode;
pub use util::{assert_red_black_tree, insert, remove};
