//! Node.

mod edit;
mod internal;
mod nested;
mod pretty_print;

use core::cell::{BorrowError, Ref, RefMut};
use core::fmt;
use core::mem;
use core::ops::Add;

use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use crate::error::{Neighbor, NodeError, Result, StructureError};
use crate::traverse::{self, DftEvent};

use self::internal::Link;
pub use self::nested::Nested;
pub use self::pretty_print::PrettyPrint;

/// Identifier of a node.
///
/// Identifiers are unique among all nodes created in the process, and are
/// used as the default label of [`PrettyPrint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A shared owning reference to a node.
///
/// Cloning a `Node` creates another handle to the same node, not a copy of
/// it. Use [`deep_copy`][`Self::deep_copy`] to duplicate a subtree.
///
/// A handle keeps the node and its descendants alive. It does not keep the
/// ancestors alive: once every handle to the root of a tree is dropped, the
/// root is released, and its children that are still referred from somewhere
/// become roots of their own trees.
pub struct Node<T> {
    /// Target node core.
    link: Link<T>,
}

impl<T> Clone for Node<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.link.id())
            .field("value", &self.link.try_value())
            .field("degree", &self.link.degree())
            .field("is_root", &self.link.is_root())
            .field("frozen", &self.link.is_frozen())
            .finish()
    }
}

impl<T: Default> Default for Node<T> {
    /// Creates an unattached node with the default value.
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, U> PartialEq<Node<U>> for Node<T>
where
    T: PartialEq<U>,
{
    /// Compares two subtrees.
    ///
    /// # Panics
    ///
    /// May panic if associated values of some nodes are already borrowed
    /// exclusively (i.e. mutably).
    ///
    /// To avoid panicking, use [`try_eq`][`Node::try_eq`] method.
    #[inline]
    fn eq(&self, other: &Node<U>) -> bool {
        self.try_eq(other).expect(
            "[precondition] values associated to the nodes in both trees should be borrowable",
        )
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: Default + Clone> Add for &Node<T> {
    type Output = Result<Node<T>>;

    /// Combines two roots under a new root with the default value.
    ///
    /// See [`Node::combine`].
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, T::default())
    }
}

/// Node object creation.
impl<T> Node<T> {
    /// Creates an unattached node, i.e. the root of a new single-node tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::Node;
    ///
    /// let node = Node::new("root");
    /// assert!(node.is_root());
    /// assert!(node.is_leaf());
    /// assert_eq!(*node.borrow_value(), "root");
    /// ```
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_link(Link::new(value))
    }

    /// Creates a node handle from the link.
    #[inline]
    #[must_use]
    pub(crate) fn with_link(link: Link<T>) -> Self {
        Self { link }
    }

    /// Returns the identifier of the node.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.link.id()
    }

    /// Returns `true` if the two handles point to the same node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.link.ptr_eq(&other.link)
    }
}

/// Value access.
impl<T> Node<T> {
    /// Returns a reference to the value associated to the node.
    ///
    /// # Failures
    ///
    /// Fails if the value is currently mutably (i.e. exclusively) borrowed.
    #[inline]
    pub fn try_borrow_value(&self) -> core::result::Result<Ref<'_, T>, BorrowError> {
        self.link.try_value()
    }

    /// Returns a reference to the value associated to the node.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably (i.e. exclusively) borrowed.
    #[inline]
    #[must_use]
    pub fn borrow_value(&self) -> Ref<'_, T> {
        self.link.value()
    }

    /// Returns a mutable reference to the value associated to the node.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::Frozen`] if the node is frozen, and with
    /// [`NodeError::BorrowValue`] if the value is currently borrowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{Node, NodeError};
    ///
    /// let node = Node::new(1);
    /// *node.borrow_value_mut()? += 1;
    /// assert_eq!(*node.borrow_value(), 2);
    ///
    /// node.freeze();
    /// assert!(matches!(node.borrow_value_mut(), Err(NodeError::Frozen)));
    /// # Ok::<_, NodeError>(())
    /// ```
    pub fn borrow_value_mut(&self) -> Result<RefMut<'_, T>> {
        self.ensure_mutable()?;
        self.link
            .try_value_mut()
            .map_err(NodeError::BorrowValue)
    }

    /// Replaces the value associated to the node, and returns the old value.
    ///
    /// # Failures
    ///
    /// Fails in the same conditions as [`borrow_value_mut`][`Self::borrow_value_mut`].
    pub fn replace_value(&self, value: T) -> Result<T> {
        let mut current = self.borrow_value_mut()?;
        Ok(mem::replace(&mut *current, value))
    }
}

/// Structural queries.
impl<T> Node<T> {
    /// Returns true if the node has no children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.link.degree() == 0
    }

    /// Returns true if the node has any children.
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !self.is_leaf()
    }

    /// Returns true if the node has no parent.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.link.is_root()
    }

    /// Returns true if the node has no previous sibling.
    ///
    /// Always true for a root.
    #[inline]
    #[must_use]
    pub fn is_first(&self) -> bool {
        !self.link.has_prev_sibling()
    }

    /// Returns true if the node has no next sibling.
    ///
    /// Always true for a root.
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.link.has_next_sibling()
    }

    /// Returns true if the node is frozen.
    #[inline]
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.link.is_frozen()
    }

    /// Returns the root node.
    ///
    /// Returns `self` if the node is a root.
    #[must_use]
    pub fn root(&self) -> Self {
        let mut current = self.link.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        Self::with_link(current)
    }

    /// Returns the number of ancestors.
    ///
    /// Note that this is O(depth) operation.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn degree(&self) -> usize {
        self.link.degree()
    }

    /// Returns the maximum degree of the node and its descendants.
    ///
    /// Note that this is O(N) operation.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.each().map(|node| node.degree()).fold(0, usize::max)
    }

    /// Returns the greatest depth of the descendants, relative to the node.
    ///
    /// Note that this is O(N) operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! {
    ///     "root", [
    ///         /("a", [
    ///             "b",
    ///         ]),
    ///         "c",
    ///     ]
    /// };
    /// assert_eq!(root.max_depth(), 2);
    /// assert_eq!(root.child(1)?.max_depth(), 0);
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    #[must_use]
    pub fn max_depth(&self) -> usize {
        let mut depth = 0_usize;
        let mut max_depth = 0;
        for ev in self.depth_first_traverse() {
            match ev {
                DftEvent::Open(_) => {
                    max_depth = max_depth.max(depth);
                    depth += 1;
                }
                DftEvent::Close(_) => depth -= 1,
            }
        }
        max_depth
    }

    /// Returns the number of nodes in the subtree, including the node itself.
    ///
    /// Note that this is O(N) operation.
    #[must_use]
    pub fn size(&self) -> usize {
        self.each().count()
    }
}

/// Neighbor nodes accessor.
impl<T> Node<T> {
    /// Returns the parent node.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::OutOfBounds`] if the node is a root.
    #[inline]
    pub fn parent(&self) -> Result<Self> {
        self.parent_opt()
            .ok_or(NodeError::OutOfBounds(Neighbor::Parent))
    }

    /// Returns the previous sibling.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::OutOfBounds`] if the node is the first sibling.
    #[inline]
    pub fn prev_sibling(&self) -> Result<Self> {
        self.prev_sibling_opt()
            .ok_or(NodeError::OutOfBounds(Neighbor::PrevSibling))
    }

    /// Returns the next sibling.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::OutOfBounds`] if the node is the last sibling.
    #[inline]
    pub fn next_sibling(&self) -> Result<Self> {
        self.next_sibling_opt()
            .ok_or(NodeError::OutOfBounds(Neighbor::NextSibling))
    }

    /// Returns the first child node.
    #[inline]
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.link.first_child().map(Self::with_link)
    }

    /// Returns the last child node.
    #[inline]
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.link.last_child().map(Self::with_link)
    }

    /// Returns the only child.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::InvalidArgument`] unless the node has exactly
    /// one child.
    pub fn only_child(&self) -> Result<Self> {
        let degree = self.degree();
        if degree != 1 {
            return Err(NodeError::InvalidArgument { degree });
        }
        Ok(self
            .first_child()
            .expect("[consistency] degree 1 implies a first child"))
    }

    /// Returns the child at the given position.
    ///
    /// Negative indices count from the last child, i.e. `-1` is the last
    /// child.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::IndexOutOfRange`] if there is no child at the
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{tree_node, NodeError};
    ///
    /// let root = tree_node! { "root", ["a", "b", "c"] };
    /// assert_eq!(*root.child(0)?.borrow_value(), "a");
    /// assert_eq!(*root.child(-1)?.borrow_value(), "c");
    /// assert!(matches!(
    ///     root.child(3),
    ///     Err(NodeError::IndexOutOfRange { index: 3, degree: 3 })
    /// ));
    /// # Ok::<_, NodeError>(())
    /// ```
    pub fn child(&self, index: isize) -> Result<Self> {
        let degree = self.degree();
        let out_of_range = NodeError::IndexOutOfRange { index, degree };
        let normalized = if index < 0 {
            degree.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        let position = match normalized {
            Some(position) if position < degree => position,
            _ => return Err(out_of_range),
        };

        // Walk from the nearer end.
        let found = if position <= degree / 2 {
            self.children().nth(position)
        } else {
            self.children().rev().nth(degree - 1 - position)
        };
        found.ok_or(out_of_range)
    }

    /// Returns the parent node if available.
    #[inline]
    #[must_use]
    pub(crate) fn parent_opt(&self) -> Option<Self> {
        self.link.parent().map(Self::with_link)
    }

    /// Returns the previous sibling if available.
    #[inline]
    #[must_use]
    pub(crate) fn prev_sibling_opt(&self) -> Option<Self> {
        self.link.prev_sibling().map(Self::with_link)
    }

    /// Returns the next sibling if available.
    #[inline]
    #[must_use]
    pub(crate) fn next_sibling_opt(&self) -> Option<Self> {
        self.link.next_sibling().map(Self::with_link)
    }
}

/// Tree traverser.
impl<T> Node<T> {
    /// Returns the depth-first traverser.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> traverse::DepthFirstTraverser<T> {
        traverse::DepthFirstTraverser::new(self)
    }

    /// Returns the reverse depth-first traverser.
    #[inline]
    #[must_use]
    pub fn depth_first_reverse_traverse(&self) -> traverse::ReverseDepthFirstTraverser<T> {
        traverse::ReverseDepthFirstTraverser::new(self)
    }

    /// Returns the ancestors traverser, from the parent to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! { "root", [/("a", ["b"])] };
    /// let b = root.child(0)?.only_child()?;
    /// let ancestors: Vec<_> = b.ancestors().map(|node| *node.borrow_value()).collect();
    /// assert_eq!(ancestors, ["a", "root"]);
    /// assert_eq!(root.ancestors().count(), 0);
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> traverse::AncestorsTraverser<T> {
        traverse::AncestorsTraverser::new(self)
    }

    /// Returns the children traverser.
    ///
    /// The traverser is double-ended, so `children().rev()` iterates the
    /// children from the last one.
    #[inline]
    #[must_use]
    pub fn children(&self) -> traverse::ChildrenTraverser<T> {
        traverse::ChildrenTraverser::with_parent(self)
    }

    /// Returns the reverse children traverser.
    #[inline]
    #[must_use]
    pub fn children_reverse(&self) -> core::iter::Rev<traverse::ChildrenTraverser<T>> {
        self.children().rev()
    }

    /// Returns the pre-order traverser of the subtree, starting from `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! { "a", [/("b", ["d"]), "c"] };
    /// let values: Vec<_> = root.each().map(|node| *node.borrow_value()).collect();
    /// assert_eq!(values, ["a", "b", "d", "c"]);
    /// ```
    #[inline]
    #[must_use]
    pub fn each(&self) -> traverse::PreorderTraverser<T> {
        traverse::PreorderTraverser::new(self)
    }

    /// Returns the traverser of the leaves of the subtree, from left to right.
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> traverse::LeavesTraverser<T> {
        traverse::LeavesTraverser::new(self)
    }

    /// Returns the traverser of the leaves of the subtree, from right to left.
    #[inline]
    #[must_use]
    pub fn leaves_reverse(&self) -> traverse::ReverseLeavesTraverser<T> {
        traverse::ReverseLeavesTraverser::new(self)
    }

    /// Returns the traverser of `(parent, child)` pairs of the subtree, in
    /// pre-order of the child.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> traverse::EdgesTraverser<T> {
        traverse::EdgesTraverser::new(self)
    }

    /// Returns the nested structure of the subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{tree_node, Nested};
    ///
    /// let root = tree_node! { "a", [/("b", ["d"]), "c"] };
    /// match root.to_nested() {
    ///     Nested::Internal(node, children) => {
    ///         assert!(node.ptr_eq(&root));
    ///         assert_eq!(children.len(), 2);
    ///         assert!(matches!(children[1], Nested::Leaf(_)));
    ///     }
    ///     Nested::Leaf(_) => unreachable!("`root` has children"),
    /// }
    /// ```
    #[must_use]
    pub fn to_nested(&self) -> Nested<T> {
        Nested::from_events(self.depth_first_traverse())
    }

    /// Returns the nodes of the subtree in pre-order.
    #[inline]
    #[must_use]
    pub fn to_flat(&self) -> Vec<Self> {
        self.each().collect()
    }
}

/// Node creation and hierarchy modification.
impl<T> Node<T> {
    /// Fails if the node is frozen.
    #[inline]
    fn ensure_mutable(&self) -> Result<()> {
        if self.is_frozen() {
            return Err(NodeError::Frozen);
        }
        Ok(())
    }

    /// Fails if any of the neighbors whose links an edit would rewrite is
    /// frozen.
    ///
    /// An unfrozen node never has a frozen parent, so parents need no check.
    fn ensure_neighbors_mutable<const N: usize>(neighbors: [Option<Self>; N]) -> Result<()> {
        if neighbors.iter().flatten().any(Self::is_frozen) {
            return Err(NodeError::Frozen);
        }
        Ok(())
    }

    /// Fails unless `node` can be attached somewhere in the tree of `self`.
    fn ensure_attachable(&self, node: &Self) -> Result<()> {
        self.ensure_mutable()?;
        node.ensure_mutable()?;
        if !node.is_root() {
            return Err(StructureError::NotRoot.into());
        }
        if node.ptr_eq(&self.root()) {
            return Err(StructureError::AncestorDescendantLoop.into());
        }
        Ok(())
    }

    /// Creates a node as the last child of `self`, and returns `self`.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::Frozen`] if `self` or its current last child
    /// is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::Node;
    ///
    /// let root = Node::new("root");
    /// root.append_child("a")?.append_child("b")?;
    /// let values: Vec<_> = root.children().map(|node| *node.borrow_value()).collect();
    /// assert_eq!(values, ["a", "b"]);
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    pub fn append_child(&self, value: T) -> Result<&Self> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.last_child()])?;
        edit::insert_as_last_child(&self.link, &Link::new(value));
        Ok(self)
    }

    /// Creates a node as the first child of `self`, and returns `self`.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::Frozen`] if `self` or its current first child
    /// is frozen.
    pub fn prepend_child(&self, value: T) -> Result<&Self> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.first_child()])?;
        edit::insert_as_first_child(&self.link, &Link::new(value));
        Ok(self)
    }

    /// Attaches the root node `child` as the last child of `self`, and
    /// returns `self`.
    ///
    /// # Failures
    ///
    /// * [`NodeError::Frozen`] if `self`, `child`, or the current last child
    ///   of `self` is frozen.
    /// * [`StructureError::NotRoot`] if `child` has a parent.
    /// * [`StructureError::AncestorDescendantLoop`] if `child` is the root
    ///   of `self`.
    pub fn append_child_node(&self, child: &Self) -> Result<&Self> {
        self.ensure_attachable(child)?;
        Self::ensure_neighbors_mutable([self.last_child()])?;
        trace!(parent = %self.id(), child = %child.id(), "attaching node as the last child");
        edit::insert_as_last_child(&self.link, &child.link);
        Ok(self)
    }

    /// Attaches the root node `child` as the first child of `self`, and
    /// returns `self`.
    ///
    /// # Failures
    ///
    /// Fails in the same conditions as [`append_child_node`][`Self::append_child_node`].
    pub fn prepend_child_node(&self, child: &Self) -> Result<&Self> {
        self.ensure_attachable(child)?;
        Self::ensure_neighbors_mutable([self.first_child()])?;
        trace!(parent = %self.id(), child = %child.id(), "attaching node as the first child");
        edit::insert_as_first_child(&self.link, &child.link);
        Ok(self)
    }

    /// Creates a node as the next sibling of `self`, and returns `self`.
    ///
    /// # Failures
    ///
    /// * [`NodeError::Frozen`] if `self` or its next sibling is frozen.
    /// * [`StructureError::SiblingsWithoutParent`] if `self` is a root.
    pub fn append_sibling(&self, value: T) -> Result<&Self> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.next_sibling_opt()])?;
        edit::insert_after(&self.link, &Link::new(value))?;
        Ok(self)
    }

    /// Creates a node as the previous sibling of `self`, and returns `self`.
    ///
    /// # Failures
    ///
    /// * [`NodeError::Frozen`] if `self` or its previous sibling is frozen.
    /// * [`StructureError::SiblingsWithoutParent`] if `self` is a root.
    pub fn prepend_sibling(&self, value: T) -> Result<&Self> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.prev_sibling_opt()])?;
        edit::insert_before(&self.link, &Link::new(value))?;
        Ok(self)
    }

    /// Attaches the root node `sibling` as the next sibling of `self`, and
    /// returns `self`.
    ///
    /// # Failures
    ///
    /// * [`NodeError::Frozen`] if `self`, `sibling`, or the next sibling of
    ///   `self` is frozen.
    /// * [`StructureError::SiblingsWithoutParent`] if `self` is a root.
    /// * [`StructureError::NotRoot`] if `sibling` has a parent.
    /// * [`StructureError::AncestorDescendantLoop`] if `sibling` is the root
    ///   of `self`.
    pub fn append_sibling_node(&self, sibling: &Self) -> Result<&Self> {
        self.ensure_attachable(sibling)?;
        Self::ensure_neighbors_mutable([self.next_sibling_opt()])?;
        trace!(anchor = %self.id(), sibling = %sibling.id(), "attaching node as the next sibling");
        edit::insert_after(&self.link, &sibling.link)?;
        Ok(self)
    }

    /// Attaches the root node `sibling` as the previous sibling of `self`,
    /// and returns `self`.
    ///
    /// # Failures
    ///
    /// Fails in the same conditions as [`append_sibling_node`][`Self::append_sibling_node`].
    pub fn prepend_sibling_node(&self, sibling: &Self) -> Result<&Self> {
        self.ensure_attachable(sibling)?;
        Self::ensure_neighbors_mutable([self.prev_sibling_opt()])?;
        trace!(anchor = %self.id(), sibling = %sibling.id(), "attaching node as the previous sibling");
        edit::insert_before(&self.link, &sibling.link)?;
        Ok(self)
    }

    /// Detaches the node and its descendants from the current position, and
    /// lets it be a root.
    ///
    /// Does nothing if the node is already a root.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::Frozen`] if `self` or an adjacent sibling is
    /// frozen.
    pub fn extract(&self) -> Result<&Self> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.prev_sibling_opt(), self.next_sibling_opt()])?;
        if !self.is_root() {
            trace!(node = %self.id(), "extracting subtree");
            edit::unlink(&self.link);
        }
        Ok(self)
    }

    /// Removes the node from the tree, and makes every former child a root.
    ///
    /// Returns the former children in the original order. The children keep
    /// their own subtrees.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::Frozen`] if `self`, any of its children, or
    /// an adjacent sibling is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! { "root", ["a", /("b", ["b0", "b1"]), "c"] };
    /// let b = root.child(1)?;
    /// let orphans = b.delete()?;
    ///
    /// assert!(b.is_root() && b.is_leaf());
    /// assert_eq!(orphans.len(), 2);
    /// assert!(orphans.iter().all(|node| node.is_root()));
    /// assert_eq!(root.degree(), 2);
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    pub fn delete(&self) -> Result<Vec<Self>> {
        self.ensure_mutable()?;
        Self::ensure_neighbors_mutable([self.prev_sibling_opt(), self.next_sibling_opt()])?;
        if self.children().any(|child| child.is_frozen()) {
            return Err(NodeError::Frozen);
        }
        trace!(node = %self.id(), degree = self.degree(), "deleting node");
        edit::unlink(&self.link);
        let children: Vec<_> = self.children().collect();
        for child in &children {
            edit::unlink(&child.link);
        }
        Ok(children)
    }

    /// Marks the node and all its descendants frozen.
    ///
    /// Frozen nodes can never be modified again: hierarchy edits and value
    /// modifications through them fail with [`NodeError::Frozen`].
    /// Freezing is idempotent.
    ///
    /// Nothing is frozen if the operation fails.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::ValueInUse`] if the value of any node in the
    /// subtree is mutably borrowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{Node, NodeError};
    ///
    /// let node = Node::new(String::from("draft"));
    /// let guard = node.borrow_value_mut()?;
    /// assert!(matches!(node.try_freeze(), Err(NodeError::ValueInUse(_))));
    /// assert!(!node.is_frozen());
    ///
    /// drop(guard);
    /// node.try_freeze()?;
    /// assert!(node.is_frozen());
    /// # Ok::<_, NodeError>(())
    /// ```
    pub fn try_freeze(&self) -> Result<&Self> {
        for node in self.each() {
            node.try_borrow_value().map_err(NodeError::ValueInUse)?;
        }
        if !self.is_frozen() {
            trace!(node = %self.id(), "freezing subtree");
        }
        for node in self.each() {
            node.link.set_frozen();
        }
        Ok(self)
    }

    /// Marks the node and all its descendants frozen.
    ///
    /// # Panics
    ///
    /// Panics if the value of any node in the subtree is mutably borrowed.
    /// To avoid panicking, use [`try_freeze`][`Self::try_freeze`].
    pub fn freeze(&self) -> &Self {
        self.try_freeze().expect(
            "[precondition] values associated to the nodes in the subtree should not be mutably borrowed",
        )
    }
}

/// Copy and combination.
impl<T: Clone> Node<T> {
    /// Clones the subtree and returns it as a new independent tree.
    ///
    /// The copy is not frozen even if `self` is.
    ///
    /// # Failures
    ///
    /// Fails if any value associated to the nodes in the subtree is mutably
    /// (i.e. exclusively) borrowed.
    pub fn try_deep_copy(&self) -> core::result::Result<Self, BorrowError> {
        let mut ancestors: Vec<Link<T>> = Vec::new();
        for ev in self.depth_first_traverse() {
            match ev {
                DftEvent::Open(source) => {
                    let copied = Link::new(source.try_borrow_value()?.clone());
                    if let Some(parent) = ancestors.last() {
                        edit::insert_as_last_child(parent, &copied);
                    }
                    ancestors.push(copied);
                }
                DftEvent::Close(_) => {
                    let copied = ancestors
                        .pop()
                        .expect("[consistency] `Open` and `Close` events should be balanced");
                    if ancestors.is_empty() {
                        return Ok(Self::with_link(copied));
                    }
                }
            }
        }
        unreachable!("[validity] depth-first traversal should close the starting node")
    }

    /// Clones the subtree and returns it as a new independent tree.
    ///
    /// # Panics
    ///
    /// Panics if any value associated to the nodes in the subtree is mutably
    /// (i.e. exclusively) borrowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! { "root", [/("a", ["b"]), "c"] };
    /// let copied = root.deep_copy();
    /// assert_eq!(copied, root);
    /// assert!(!copied.ptr_eq(&root));
    ///
    /// copied.append_child("d")?;
    /// assert_eq!(root.degree(), 2);
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.try_deep_copy().expect(
            "[precondition] values associated to the nodes in the subtree should be borrowable",
        )
    }

    /// Creates a new root with the given value, and attaches `self` and
    /// `other` as its first and second children.
    ///
    /// Frozen operands are deep-copied before being attached, so the
    /// originals are left untouched. The same goes for `other` when it is
    /// `self` itself.
    ///
    /// # Failures
    ///
    /// Fails with [`StructureError::NotRoot`] unless both nodes are roots.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::Node;
    ///
    /// let x = Node::new("x");
    /// let y = Node::new("y");
    /// let z = (&x + &y)?;
    ///
    /// assert!(z.is_root());
    /// assert_eq!(z.degree(), 2);
    /// assert!(z.child(0)?.ptr_eq(&x));
    /// assert!(z.child(1)?.ptr_eq(&y));
    /// # Ok::<_, sprig::NodeError>(())
    /// ```
    pub fn combine(&self, other: &Self, value: T) -> Result<Self> {
        if !self.is_root() || !other.is_root() {
            return Err(StructureError::NotRoot.into());
        }

        let first = if self.is_frozen() {
            self.deep_copy()
        } else {
            self.clone()
        };
        let second = if other.is_frozen() || other.ptr_eq(self) {
            other.deep_copy()
        } else {
            other.clone()
        };

        let root = Self::new(value);
        trace!(
            root = %root.id(),
            first = %first.id(),
            second = %second.id(),
            "combining trees"
        );
        edit::insert_as_last_child(&root.link, &first.link);
        edit::insert_as_last_child(&root.link, &second.link);
        Ok(root)
    }
}

/// Comparison.
impl<T> Node<T> {
    /// Compares two subtrees.
    ///
    /// Returns `Ok(true)` if the two subtrees have the same shape and equal
    /// values, even if they are stored in different allocation.
    ///
    /// # Failures
    ///
    /// May return `Err(_)` if associated values of some nodes are already
    /// borrowed exclusively (i.e. mutably).
    pub fn try_eq<U>(&self, other: &Node<U>) -> core::result::Result<bool, BorrowError>
    where
        T: PartialEq<U>,
    {
        // A shared allocation means both handles point to the same node.
        if self.link.addr() == other.link.addr() {
            return Ok(true);
        }

        let mut self_iter = self.depth_first_traverse();
        let mut other_iter = other.depth_first_traverse();
        loop {
            match (self_iter.next(), other_iter.next()) {
                (None, None) => return Ok(true),
                (Some(DftEvent::Open(l)), Some(DftEvent::Open(r))) => {
                    if l.degree() != r.degree()
                        || *l.try_borrow_value()? != *r.try_borrow_value()?
                    {
                        return Ok(false);
                    }
                }
                (Some(DftEvent::Close(_)), Some(DftEvent::Close(_))) => {}
                _ => return Ok(false),
            }
        }
    }
}

/// Debug printing.
impl<T> Node<T> {
    /// Returns the pretty-printable proxy object to the node and descendants,
    /// labelled with the node identifiers.
    #[inline]
    #[must_use]
    pub fn pretty_print(&self) -> PrettyPrint<'_, T, fn(&Node<T>) -> NodeId> {
        PrettyPrint::new(self, Node::id as fn(&Node<T>) -> NodeId)
    }

    /// Returns the pretty-printable proxy object to the node and descendants,
    /// labelled by the given function.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::tree_node;
    ///
    /// let root = tree_node! { "a", [/("b", ["d"]), "c"] };
    /// let printed = root
    ///     .pretty_print_with(|node| node.borrow_value().to_string())
    ///     .to_string();
    /// assert_eq!(printed, "a\n├─╴b\n│  └─╴d\n└─╴c");
    /// ```
    #[inline]
    #[must_use]
    pub fn pretty_print_with<F, L>(&self, label: F) -> PrettyPrint<'_, T, F>
    where
        F: Fn(&Node<T>) -> L,
        L: fmt::Display,
    {
        PrettyPrint::new(self, label)
    }

    /// Renders the subtree labelled with the node identifiers.
    #[inline]
    #[must_use]
    pub fn render(&self) -> String {
        self.pretty_print().to_string()
    }

    /// Renders the subtree labelled by the given function.
    #[inline]
    #[must_use]
    pub fn render_with<F, L>(&self, label: F) -> String
    where
        F: Fn(&Node<T>) -> L,
        L: fmt::Display,
    {
        self.pretty_print_with(label).to_string()
    }

    /// Renders the subtree labelled by the given function, one string per
    /// node.
    #[inline]
    #[must_use]
    pub fn render_lines_with<F, L>(&self, label: F) -> Vec<String>
    where
        F: Fn(&Node<T>) -> L,
        L: fmt::Display,
    {
        self.pretty_print_with(label).lines()
    }
}
