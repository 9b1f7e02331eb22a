//! Nested representation of a subtree.

use alloc::vec::Vec;

use crate::node::Node;
use crate::traverse::{DepthFirstTraverser, DftEvent};

/// Nested representation of a subtree.
///
/// A leaf is represented by the bare node, and an internal node is
/// represented by the node with the nested representations of its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    /// A leaf node.
    Leaf(Node<T>),
    /// An internal node and its children.
    Internal(Node<T>, Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Returns the node at the top of this structure.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &Node<T> {
        match self {
            Self::Leaf(node) | Self::Internal(node, _) => node,
        }
    }

    /// Returns the nested children, or an empty slice for a leaf.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Nested<T>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Internal(_, children) => children,
        }
    }

    /// Builds the nested structure from the depth-first traversal of a subtree.
    pub(super) fn from_events(events: DepthFirstTraverser<T>) -> Self {
        let mut stack: Vec<(Node<T>, Vec<Self>)> = Vec::new();
        for ev in events {
            match ev {
                DftEvent::Open(node) => stack.push((node, Vec::new())),
                DftEvent::Close(_) => {
                    let (node, children) = stack
                        .pop()
                        .expect("[consistency] `Open` and `Close` events should be balanced");
                    let nested = if children.is_empty() {
                        Self::Leaf(node)
                    } else {
                        Self::Internal(node, children)
                    };
                    match stack.last_mut() {
                        Some((_, siblings)) => siblings.push(nested),
                        None => return nested,
                    }
                }
            }
        }
        unreachable!("[validity] depth-first traversal should close the starting node")
    }
}
