//! Tree.

use core::cell::OnceCell;
use core::fmt;

use alloc::string::String;

use tracing::debug;

use crate::error::Result;
use crate::node::Node;
use crate::traverse::{EdgesTraverser, LeavesTraverser, PreorderTraverser};

/// An immutable tree.
///
/// A `Tree` holds the frozen root of a structure built with [`Node`]s. Since
/// the structure can never change again, structural metrics are computed
/// only once and cached.
///
/// # Examples
///
/// ```
/// use sprig::{tree_node, NodeError, Tree};
///
/// let root = tree_node! { "root", [/("a", ["b"]), "c"] };
/// let b = root.child(0)?.only_child()?;
///
/// // Any node in the structure can be used to publish the tree.
/// let tree = Tree::new(&b);
/// assert!(tree.root().ptr_eq(&root));
/// assert_eq!(tree.degree(), 2);
/// assert_eq!(tree.depth(), 2);
///
/// // The nodes are frozen now.
/// assert!(matches!(root.append_child("d"), Err(NodeError::Frozen)));
/// # Ok::<_, NodeError>(())
/// ```
pub struct Tree<T> {
    /// Frozen root node.
    root: Node<T>,
    /// Maximum degree of the nodes.
    degree: OnceCell<usize>,
    /// Maximum depth of the nodes.
    depth: OnceCell<usize>,
    /// The number of the nodes.
    size: OnceCell<usize>,
}

impl<T> Tree<T> {
    /// Freezes the whole structure the given node belongs to, and creates a
    /// tree from it.
    ///
    /// The root is shared with the node, not copied. Use
    /// [`Node::deep_copy`] beforehand to keep the original structure editable.
    ///
    /// # Failures
    ///
    /// Fails with [`NodeError::ValueInUse`][`crate::NodeError::ValueInUse`] if
    /// the value of any node in the structure is mutably borrowed. Nothing is frozen in that case.
    pub fn try_new(node: &Node<T>) -> Result<Self> {
        let root = node.root();
        root.try_freeze()?;
        debug!(root = %root.id(), "created tree from frozen root");
        Ok(Self {
            root,
            degree: OnceCell::new(),
            depth: OnceCell::new(),
            size: OnceCell::new(),
        })
    }

    /// Freezes the whole structure the given node belongs to, and creates a
    /// tree from it.
    ///
    /// # Panics
    ///
    /// Panics if the value of any node in the structure is mutably borrowed.
    /// To avoid panicking, use [`try_new`][`Self::try_new`].
    #[must_use]
    pub fn new(node: &Node<T>) -> Self {
        Self::try_new(node).expect(
            "[precondition] values associated to the nodes in the tree should not be mutably borrowed",
        )
    }

    /// Returns the root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Node<T> {
        self.root.clone()
    }

    /// Returns the maximum degree of the nodes.
    #[must_use]
    pub fn degree(&self) -> usize {
        *self.degree.get_or_init(|| self.root.max_degree())
    }

    /// Returns the maximum depth of the nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        *self.depth.get_or_init(|| self.root.max_depth())
    }

    /// Returns the number of the nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        *self.size.get_or_init(|| self.root.size())
    }

    /// Returns the pre-order traverser of the nodes.
    #[inline]
    #[must_use]
    pub fn each_node(&self) -> PreorderTraverser<T> {
        self.root.each()
    }

    /// Returns the traverser of the leaves, from left to right.
    #[inline]
    #[must_use]
    pub fn each_leaf(&self) -> LeavesTraverser<T> {
        self.root.leaves()
    }

    /// Returns the traverser of `(parent, child)` pairs.
    #[inline]
    #[must_use]
    pub fn each_edge(&self) -> EdgesTraverser<T> {
        self.root.edges()
    }

    /// Renders the tree labelled by the given function.
    #[inline]
    #[must_use]
    pub fn render_with<F, L>(&self, label: F) -> String
    where
        F: Fn(&Node<T>) -> L,
        L: fmt::Display,
    {
        self.root.render_with(label)
    }
}

impl<T> Clone for Tree<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            degree: self.degree.clone(),
            depth: self.depth.clone(),
            size: self.size.clone(),
        }
    }
}

impl<T> From<Node<T>> for Tree<T> {
    #[inline]
    fn from(node: Node<T>) -> Self {
        Self::new(&node)
    }
}

impl<T> From<&Node<T>> for Tree<T> {
    #[inline]
    fn from(node: &Node<T>) -> Self {
        Self::new(node)
    }
}

impl<T, U> PartialEq<Tree<U>> for Tree<T>
where
    T: PartialEq<U>,
{
    /// Compares the structures and the values of two trees.
    #[inline]
    fn eq(&self, other: &Tree<U>) -> bool {
        self.root == other.root
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("degree", &self.degree.get())
            .field("depth", &self.depth.get())
            .field("size", &self.size.get())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    /// Renders the tree labelled with the node values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Freezing refuses values borrowed mutably, and frozen values cannot
        // be borrowed mutably afterwards.
        let label = |node: &Node<T>| {
            let value = node.borrow_value();
            alloc::format!("{}", *value)
        };
        fmt::Display::fmt(&self.root.pretty_print_with(label), f)
    }
}
