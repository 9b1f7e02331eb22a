//! Errors.

use core::cell::{BorrowError, BorrowMutError};
use core::fmt;

/// Result type of fallible node and tree operations.
pub type Result<T, E = NodeError> = core::result::Result<T, E>;

/// A neighbor of a node that may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// The parent node.
    Parent,
    /// The previous sibling.
    PrevSibling,
    /// The next sibling.
    NextSibling,
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Parent => "parent",
            Self::PrevSibling => "previous sibling",
            Self::NextSibling => "next sibling",
        };
        f.write_str(msg)
    }
}

/// Structure modification error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum StructureError {
    /// Attempt to make a node the sibling of a root node.
    #[error("attempt to make a node sibling of a root node")]
    SiblingsWithoutParent,
    /// Attempt to attach or combine a node that still has a parent.
    #[error("the node is expected to be a root, but it has a parent")]
    NotRoot,
    /// Attempt to make a node its own descendant or ancestor.
    #[error("attempt to make a node its own descendant or ancestor")]
    AncestorDescendantLoop,
}

/// Error of node operations.
// `From<BorrowMutError> for Self` is not implemented because a user-provided
// `BorrowMutError` is unrelated to the node operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NodeError {
    /// The requested neighbor does not exist.
    #[error("the node has no {0}")]
    OutOfBounds(Neighbor),
    /// The operation would break the tree shape.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// The child index is out of range.
    #[error("child index {index} is out of range for a node with {degree} children")]
    IndexOutOfRange {
        /// The requested index, as given by the caller.
        index: isize,
        /// The number of children of the node.
        degree: usize,
    },
    /// The node does not have exactly one child.
    #[error("expected the node to have exactly one child, but it has {degree}")]
    InvalidArgument {
        /// The number of children of the node.
        degree: usize,
    },
    /// Attempt to modify a frozen node.
    #[error("attempt to modify a frozen node")]
    Frozen,
    /// Failed to borrow the value of the node.
    #[error("failed to borrow the value associated to the node")]
    BorrowValue(#[source] BorrowMutError),
    /// A value in the subtree is mutably borrowed, so it cannot be frozen.
    #[error("cannot freeze a value that is mutably borrowed")]
    ValueInUse(#[source] BorrowError),
}

impl NodeError {
    /// Returns true if the error is a mutability violation.
    #[inline]
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self, Self::Frozen)
    }

    /// Returns the structure error, if the error is a structure violation.
    #[inline]
    #[must_use]
    pub fn as_structure(&self) -> Option<StructureError> {
        match self {
            Self::Structure(e) => Some(*e),
            _ => None,
        }
    }
}
