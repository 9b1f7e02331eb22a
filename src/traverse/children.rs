//! Children traversal.

use core::iter;

use crate::node::Node;

/// Children traverser.
///
/// This iterates the children from both ends. The traverser remembers the
/// number of remaining children at its creation, so it never yields a node
/// twice even if forward and backward iterations meet in the middle.
#[derive(Debug)]
pub struct ChildrenTraverser<T> {
    /// Next nodes to return from the front and from the back.
    next: Option<(Node<T>, Node<T>)>,
    /// The number of the nodes not yet returned.
    remaining: usize,
}

impl<T> Clone for ChildrenTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> ChildrenTraverser<T> {
    /// Creates a traverser of the children of the given node.
    #[must_use]
    pub fn with_parent(parent: &Node<T>) -> Self {
        let next = parent.first_child().zip(parent.last_child());
        let remaining = if next.is_some() { parent.degree() } else { 0 };
        Self { next, remaining }
    }

    /// Returns the next forward item without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Node<T>> {
        self.next.as_ref().map(|(next, _next_back)| next)
    }

    /// Returns the next backward item without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek_back(&self) -> Option<&Node<T>> {
        self.next.as_ref().map(|(_next, next_back)| next_back)
    }
}

impl<T> Iterator for ChildrenTraverser<T> {
    type Item = Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (next, next_back) = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = next
                .next_sibling_opt()
                .map(|next_of_next| (next_of_next, next_back));
        }
        Some(next)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for ChildrenTraverser<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (next, next_back) = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = next_back
                .prev_sibling_opt()
                .map(|next_of_next_back| (next, next_of_next_back));
        }
        Some(next_back)
    }
}

impl<T> ExactSizeIterator for ChildrenTraverser<T> {}

impl<T> iter::FusedIterator for ChildrenTraverser<T> {}
