//! Ancestors traversal.

use core::iter;

use crate::node::Node;

/// Traverser of the proper ancestors of a node, from the parent up to the
/// root.
#[derive(Debug)]
pub struct AncestorsTraverser<T> {
    /// Ancestor to return next.
    pending: Option<Node<T>>,
}

impl<T> Clone for AncestorsTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<T> AncestorsTraverser<T> {
    /// Creates a traverser of the ancestors of `node`.
    #[inline]
    #[must_use]
    pub(crate) fn new(node: &Node<T>) -> Self {
        Self {
            pending: node.parent_opt(),
        }
    }

    /// Returns the next ancestor without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Node<T>> {
        self.pending.as_ref()
    }
}

impl<T> Iterator for AncestorsTraverser<T> {
    type Item = Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take()?;
        self.pending = current.parent_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.pending {
            Some(_) => (1, None),
            None => (0, Some(0)),
        }
    }
}

impl<T> iter::FusedIterator for AncestorsTraverser<T> {}
