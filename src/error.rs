use thiserror::Error;

/// A structural defect found by [`AvlTree::validate`](crate::AvlTree::validate).
///
/// Positions count nodes in pre-order from the root (starting at 0), except
/// for [`InvariantError::OutOfOrder`] which counts in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root node has a parent link")]
    RootHasParent,
    #[error("child of node at position {position} does not link back to it")]
    BrokenParentLink { position: usize },
    #[error("key at ascending position {position} is not greater than its predecessor")]
    OutOfOrder { position: usize },
    #[error("node at position {position} caches height {cached}, expected {expected}")]
    StaleHeight {
        position: usize,
        cached: usize,
        expected: usize,
    },
    #[error("node at position {position} has balance factor {balance}")]
    Unbalanced { position: usize, balance: isize },
    #[error("tree holds {counted} nodes but records {recorded}")]
    LengthMismatch { counted: usize, recorded: usize },
}
