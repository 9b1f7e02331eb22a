//! Depth-first traversal.

use core::iter;

use crate::node::Node;

/// Event of a depth-first traversal.
///
/// A node emits `Open` before any event of its descendants, and `Close`
/// after all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DftEvent<T> {
    /// Entering a node.
    Open(T),
    /// Leaving a node.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Returns the payload, discarding the event kind.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Open(v) | Self::Close(v) => v,
        }
    }

    /// Converts the payload and keeps the event kind.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DftEvent<U> {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }

    /// Returns the payload of an `Open` event.
    #[inline]
    #[must_use]
    pub fn into_open(self) -> Option<T> {
        match self {
            Self::Open(v) => Some(v),
            Self::Close(_) => None,
        }
    }
}

impl<T> DftEvent<Node<T>> {
    /// Returns the following event of a forward walk over the whole tree.
    ///
    /// Returns `None` after the root is closed.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        let next = match self {
            Self::Open(node) => match node.first_child() {
                Some(first) => Self::Open(first),
                None => Self::Close(node.clone()),
            },
            Self::Close(node) => match node.next_sibling_opt() {
                Some(next) => Self::Open(next),
                None => Self::Close(node.parent_opt()?),
            },
        };
        Some(next)
    }

    /// Returns the following event of a backward walk over the whole tree.
    ///
    /// Returns `None` after the root is opened.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        let prev = match self {
            Self::Close(node) => match node.last_child() {
                Some(last) => Self::Close(last),
                None => Self::Open(node.clone()),
            },
            Self::Open(node) => match node.prev_sibling_opt() {
                Some(prev) => Self::Close(prev),
                None => Self::Open(node.parent_opt()?),
            },
        };
        Some(prev)
    }
}

/// A walk over the events of a subtree, in either direction.
#[derive(Debug)]
struct Walk<T> {
    /// Event to emit next.
    pending: Option<DftEvent<Node<T>>>,
    /// Top of the subtree.
    top: Node<T>,
    /// Direction.
    forward: bool,
}

impl<T> Clone for Walk<T> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
            top: self.top.clone(),
            forward: self.forward,
        }
    }
}

impl<T> Walk<T> {
    /// Starts a walk over the subtree of `top`.
    fn new(top: &Node<T>, forward: bool) -> Self {
        let first = if forward {
            DftEvent::Open(top.clone())
        } else {
            DftEvent::Close(top.clone())
        };
        Self {
            pending: Some(first),
            top: top.clone(),
            forward,
        }
    }

    /// Returns true if the event is the last one of the walk.
    fn is_last(&self, ev: &DftEvent<Node<T>>) -> bool {
        match (ev, self.forward) {
            (DftEvent::Close(node), true) | (DftEvent::Open(node), false) => {
                node.ptr_eq(&self.top)
            }
            _ => false,
        }
    }

    /// Emits the pending event and computes the one after it.
    fn advance(&mut self) -> Option<DftEvent<Node<T>>> {
        let current = self.pending.take()?;
        if !self.is_last(&current) {
            self.pending = if self.forward {
                current.next()
            } else {
                current.prev()
            };
        }
        Some(current)
    }

    /// Returns the bounds of the number of remaining events.
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            None => (0, Some(0)),
            Some(ev) if self.is_last(ev) => (1, Some(1)),
            // The pending event, and at least the last one.
            Some(_) => (2, None),
        }
    }
}

/// Depth-first traverser of a subtree.
///
/// Starts with `Open` of the top node and ends with `Close` of it.
#[derive(Debug)]
pub struct DepthFirstTraverser<T> {
    /// Forward walk.
    walk: Walk<T>,
}

impl<T> Clone for DepthFirstTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<T> DepthFirstTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[inline]
    #[must_use]
    pub fn new(top: &Node<T>) -> Self {
        Self {
            walk: Walk::new(top, true),
        }
    }

    /// Returns the next event without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&DftEvent<Node<T>>> {
        self.walk.pending.as_ref()
    }
}

impl<T> Iterator for DepthFirstTraverser<T> {
    type Item = DftEvent<Node<T>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> iter::FusedIterator for DepthFirstTraverser<T> {}

/// Reverse depth-first traverser of a subtree.
///
/// Starts with `Close` of the top node and ends with `Open` of it, emitting
/// exactly the events of [`DepthFirstTraverser`] in reverse order.
#[derive(Debug)]
pub struct ReverseDepthFirstTraverser<T> {
    /// Backward walk.
    walk: Walk<T>,
}

impl<T> Clone for ReverseDepthFirstTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<T> ReverseDepthFirstTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[inline]
    #[must_use]
    pub fn new(top: &Node<T>) -> Self {
        Self {
            walk: Walk::new(top, false),
        }
    }

    /// Returns the next event without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&DftEvent<Node<T>>> {
        self.walk.pending.as_ref()
    }
}

impl<T> Iterator for ReverseDepthFirstTraverser<T> {
    type Item = DftEvent<Node<T>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> iter::FusedIterator for ReverseDepthFirstTraverser<T> {}

/// Pre-order traverser: the top node, then its descendants.
#[derive(Debug)]
pub struct PreorderTraverser<T> {
    /// Underlying events.
    events: DepthFirstTraverser<T>,
}

impl<T> Clone for PreorderTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T> PreorderTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[inline]
    #[must_use]
    pub(crate) fn new(top: &Node<T>) -> Self {
        Self {
            events: DepthFirstTraverser::new(top),
        }
    }
}

impl<T> Iterator for PreorderTraverser<T> {
    type Item = Node<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.events.find_map(DftEvent::into_open)
    }
}

impl<T> iter::FusedIterator for PreorderTraverser<T> {}

/// Traverser of the leaves of a subtree, from left to right.
#[derive(Debug)]
pub struct LeavesTraverser<T> {
    /// Underlying events.
    events: DepthFirstTraverser<T>,
}

impl<T> Clone for LeavesTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T> LeavesTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[inline]
    #[must_use]
    pub(crate) fn new(top: &Node<T>) -> Self {
        Self {
            events: DepthFirstTraverser::new(top),
        }
    }
}

impl<T> Iterator for LeavesTraverser<T> {
    type Item = Node<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.events
            .find_map(|ev| ev.into_open().filter(Node::is_leaf))
    }
}

impl<T> iter::FusedIterator for LeavesTraverser<T> {}

/// Traverser of the leaves of a subtree, from right to left.
#[derive(Debug)]
pub struct ReverseLeavesTraverser<T> {
    /// Underlying events.
    events: ReverseDepthFirstTraverser<T>,
}

impl<T> Clone for ReverseLeavesTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T> ReverseLeavesTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[inline]
    #[must_use]
    pub(crate) fn new(top: &Node<T>) -> Self {
        Self {
            events: ReverseDepthFirstTraverser::new(top),
        }
    }
}

impl<T> Iterator for ReverseLeavesTraverser<T> {
    type Item = Node<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        // A leaf emits `Close` and `Open` back to back; pick the latter.
        self.events
            .find_map(|ev| ev.into_open().filter(Node::is_leaf))
    }
}

impl<T> iter::FusedIterator for ReverseLeavesTraverser<T> {}

/// Traverser of the `(parent, child)` pairs of a subtree, in pre-order of
/// the child.
#[derive(Debug)]
pub struct EdgesTraverser<T> {
    /// Underlying events, with the opening of the top node consumed.
    events: DepthFirstTraverser<T>,
}

impl<T> Clone for EdgesTraverser<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T> EdgesTraverser<T> {
    /// Creates a traverser of the subtree of `top`.
    #[must_use]
    pub(crate) fn new(top: &Node<T>) -> Self {
        let mut events = DepthFirstTraverser::new(top);
        // The top node is never the child of an edge inside the subtree.
        events.next();
        Self { events }
    }
}

impl<T> Iterator for EdgesTraverser<T> {
    type Item = (Node<T>, Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.events.find_map(DftEvent::into_open)?;
        let parent = child
            .parent_opt()
            .expect("[validity] descendants of the top node have a parent");
        Some((parent, child))
    }
}

impl<T> iter::FusedIterator for EdgesTraverser<T> {}
