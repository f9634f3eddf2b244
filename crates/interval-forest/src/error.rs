use thiserror::Error;

/// Structural defects reported by the tree validators.
///
/// These are only ever produced by [`assert_red_black_tree`] and the map
/// `assert_valid` methods, which tests run after mutations. A well-behaved
/// tree never yields one outside of a test for the validators themselves.
///
/// [`assert_red_black_tree`]: crate::rb::assert_red_black_tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root has a parent link")]
    RootHasParent,
    #[error("root is not black")]
    RootNotBlack,
    #[error("broken parent link on a child of node {0}")]
    BrokenParentLink(u32),
    #[error("red node {0} has a red child")]
    RedRedViolation(u32),
    #[error("black-height mismatch under node {0}")]
    BlackHeightMismatch(u32),
    #[error("key order violated at node {0}")]
    OrderViolation(u32),
    #[error("stale max annotation at node {0}")]
    MaxMismatch(u32),
    #[error("recorded size {recorded} does not match {actual} reachable nodes")]
    SizeMismatch { recorded: usize, actual: usize },
}
