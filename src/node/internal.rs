//! Internals of a node.

use core::cell::{BorrowError, BorrowMutError, Cell, Ref, RefCell, RefMut};
use core::mem;
use core::sync::atomic::{AtomicU64, Ordering};

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;

use crate::node::NodeId;

/// Source of node identifiers.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Shared state of a node.
struct NodeCore<T> {
    /// Payload.
    value: RefCell<T>,
    /// Links to the surrounding nodes.
    links: RefCell<Links<T>>,
    /// Cached length of the child chain.
    degree: Cell<usize>,
    /// Freeze flag. Never cleared once set.
    frozen: Cell<bool>,
    /// Process-wide unique identifier.
    id: NodeId,
}

/// Links to the surrounding nodes.
///
/// Ownership flows downward and rightward only: a parent owns its first
/// child, and each child owns its next sibling. The other directions are
/// weak.
struct Links<T> {
    /// Enclosing node.
    parent: WeakLink<T>,
    /// Left neighbor.
    prev_sibling: WeakLink<T>,
    /// Right neighbor.
    next_sibling: Option<Link<T>>,
    /// Head of the child chain.
    first_child: Option<Link<T>>,
    /// Tail of the child chain.
    last_child: WeakLink<T>,
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self {
            parent: WeakLink::default(),
            prev_sibling: WeakLink::default(),
            next_sibling: None,
            first_child: None,
            last_child: WeakLink::default(),
        }
    }
}

impl<T> Drop for NodeCore<T> {
    // Releasing children one by one keeps the stack flat no matter how deep
    // or wide the subtree is.
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        detach_all_children(self.links.get_mut(), &mut orphans);
        while let Some(orphan) = orphans.pop() {
            // A child still referred from outside survives as a root.
            if let Ok(mut core) = Rc::try_unwrap(orphan.core) {
                detach_all_children(core.links.get_mut(), &mut orphans);
            }
        }
    }
}

/// Clears the child chain and the children's upward and sideward links, and
/// moves the children into `orphans`.
fn detach_all_children<T>(links: &mut Links<T>, orphans: &mut Vec<Link<T>>) {
    links.last_child = WeakLink::default();
    let mut cursor = links.first_child.take();
    while let Some(child) = cursor {
        cursor = {
            let mut child_links = child.links_mut();
            child_links.parent = WeakLink::default();
            child_links.prev_sibling = WeakLink::default();
            child_links.next_sibling.take()
        };
        orphans.push(child);
    }
}

/// Owning link to a node.
pub(crate) struct Link<T> {
    /// Target.
    core: Rc<NodeCore<T>>,
}

impl<T> Clone for Link<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T> Link<T> {
    /// Allocates a detached node.
    #[must_use]
    pub(crate) fn new(value: T) -> Self {
        Self {
            core: Rc::new(NodeCore {
                value: RefCell::new(value),
                links: RefCell::default(),
                degree: Cell::new(0),
                frozen: Cell::new(false),
                id: NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)),
            }),
        }
    }

    /// Returns true if both links target the same node.
    #[inline]
    #[must_use]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Returns the untyped address of the target.
    #[inline]
    #[must_use]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.core).cast()
    }

    /// Returns a weak link to the same node.
    #[inline]
    #[must_use]
    pub(crate) fn weak(&self) -> WeakLink<T> {
        WeakLink {
            core: Rc::downgrade(&self.core),
        }
    }

    /// Borrows the links.
    fn links(&self) -> Ref<'_, Links<T>> {
        self.core
            .links
            .try_borrow()
            .expect("[consistency] links should never be borrowed across calls")
    }

    /// Borrows the links mutably.
    fn links_mut(&self) -> RefMut<'_, Links<T>> {
        self.core
            .links
            .try_borrow_mut()
            .expect("[consistency] links should never be borrowed across calls")
    }
}

/// Reads.
impl<T> Link<T> {
    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub(crate) fn id(&self) -> NodeId {
        self.core.id
    }

    /// Returns the parent.
    #[must_use]
    pub(crate) fn parent(&self) -> Option<Self> {
        self.links().parent.upgrade()
    }

    /// Returns true if there is no live parent.
    #[must_use]
    pub(crate) fn is_root(&self) -> bool {
        self.links().parent.is_dangling()
    }

    /// Returns the left neighbor.
    #[must_use]
    pub(crate) fn prev_sibling(&self) -> Option<Self> {
        self.links().prev_sibling.upgrade()
    }

    /// Returns true if there is a live left neighbor.
    #[must_use]
    pub(crate) fn has_prev_sibling(&self) -> bool {
        !self.links().prev_sibling.is_dangling()
    }

    /// Returns the right neighbor.
    #[must_use]
    pub(crate) fn next_sibling(&self) -> Option<Self> {
        self.links().next_sibling.clone()
    }

    /// Returns true if there is a right neighbor.
    #[must_use]
    pub(crate) fn has_next_sibling(&self) -> bool {
        self.links().next_sibling.is_some()
    }

    /// Returns the head of the child chain.
    #[must_use]
    pub(crate) fn first_child(&self) -> Option<Self> {
        self.links().first_child.clone()
    }

    /// Returns the tail of the child chain.
    #[must_use]
    pub(crate) fn last_child(&self) -> Option<Self> {
        self.links().last_child.upgrade()
    }

    /// Returns the cached number of children.
    #[inline]
    #[must_use]
    pub(crate) fn degree(&self) -> usize {
        self.core.degree.get()
    }

    /// Returns the freeze flag.
    #[inline]
    #[must_use]
    pub(crate) fn is_frozen(&self) -> bool {
        self.core.frozen.get()
    }
}

/// Writes.
///
/// Setters return the previous link and never fix up the other side; the
/// callers in `edit` keep both directions consistent.
impl<T> Link<T> {
    /// Sets the parent.
    pub(crate) fn set_parent(&self, parent: WeakLink<T>) -> WeakLink<T> {
        mem::replace(&mut self.links_mut().parent, parent)
    }

    /// Sets the left neighbor.
    pub(crate) fn set_prev_sibling(&self, prev: WeakLink<T>) -> WeakLink<T> {
        mem::replace(&mut self.links_mut().prev_sibling, prev)
    }

    /// Sets the right neighbor.
    pub(crate) fn set_next_sibling(&self, next: Option<Self>) -> Option<Self> {
        mem::replace(&mut self.links_mut().next_sibling, next)
    }

    /// Sets the head of the child chain.
    pub(crate) fn set_first_child(&self, first: Option<Self>) -> Option<Self> {
        mem::replace(&mut self.links_mut().first_child, first)
    }

    /// Sets the tail of the child chain.
    pub(crate) fn set_last_child(&self, last: WeakLink<T>) -> WeakLink<T> {
        mem::replace(&mut self.links_mut().last_child, last)
    }

    /// Increments the cached degree.
    #[inline]
    pub(crate) fn inc_degree(&self) {
        self.core.degree.set(self.core.degree.get() + 1);
    }

    /// Decrements the cached degree.
    #[inline]
    pub(crate) fn dec_degree(&self) {
        self.core.degree.set(self.core.degree.get() - 1);
    }

    /// Sets the freeze flag.
    #[inline]
    pub(crate) fn set_frozen(&self) {
        self.core.frozen.set(true);
    }
}

/// Payload.
impl<T> Link<T> {
    /// Borrows the payload.
    #[inline]
    pub(crate) fn try_value(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.core.value.try_borrow()
    }

    /// Borrows the payload.
    ///
    /// # Panics
    ///
    /// Panics if the payload is mutably borrowed.
    #[inline]
    #[must_use]
    pub(crate) fn value(&self) -> Ref<'_, T> {
        self.core.value.borrow()
    }

    /// Borrows the payload mutably.
    #[inline]
    pub(crate) fn try_value_mut(&self) -> Result<RefMut<'_, T>, BorrowMutError> {
        self.core.value.try_borrow_mut()
    }
}

/// Non-owning link to a node.
///
/// The default value refers to nothing, so this doubles as an optional link.
pub(crate) struct WeakLink<T> {
    /// Target.
    core: Weak<NodeCore<T>>,
}

impl<T> Clone for WeakLink<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: Weak::clone(&self.core),
        }
    }
}

impl<T> Default for WeakLink<T> {
    #[inline]
    fn default() -> Self {
        Self { core: Weak::new() }
    }
}

impl<T> WeakLink<T> {
    /// Returns an owning link if the target is alive.
    #[inline]
    #[must_use]
    pub(crate) fn upgrade(&self) -> Option<Link<T>> {
        self.core.upgrade().map(|core| Link { core })
    }

    /// Returns true if the target is gone or was never set.
    #[inline]
    #[must_use]
    fn is_dangling(&self) -> bool {
        self.core.strong_count() == 0
    }
}
