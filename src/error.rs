use thiserror::Error;

use crate::arena::NodeId;

/// Shorthand for results of tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// The ways an operation on a [`Tree`][crate::Tree] can fail.
///
/// Inserting never fails, so this only comes out of lookups and removals.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// No node in the tree holds the requested key.
    #[error("key not found")]
    KeyNotFound,
}

/// A broken structural invariant reported by [`Tree::validate`][crate::Tree::validate].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A key in a left subtree is not strictly less than its ancestor, or a key in a right
    /// subtree is less than its ancestor.
    #[error("node {node:?} is out of order relative to ancestor {ancestor:?}")]
    OutOfOrder {
        /// The misplaced node.
        node: NodeId,
        /// The ancestor whose key bounds it.
        ancestor: NodeId,
    },
    /// A child's parent link does not point back at the node owning it.
    #[error("node {child:?} is owned by {owner:?} but links back to {parent:?}")]
    BrokenBackLink {
        /// The child with the bad link.
        child: NodeId,
        /// The node that owns the child.
        owner: NodeId,
        /// Where the child's parent link points instead.
        parent: Option<NodeId>,
    },
    /// A node other than the root carries no entry, or an empty root has children.
    #[error("node {0:?} is empty but is not a childless root")]
    MisplacedEmpty(NodeId),
    /// The root has a parent link.
    #[error("root {0:?} has a parent")]
    ParentedRoot(NodeId),
    /// The number of reachable entries disagrees with the tracked length.
    #[error("tree tracks {tracked} entries but {reachable} are reachable")]
    LengthMismatch {
        /// The length the tree reports.
        tracked: usize,
        /// The number of entries found by walking the tree.
        reachable: usize,
    },
}
