//! Macros.

/// A macro that evaluates to the root node of a new structure.
///
/// A child with children of its own is written as `/(value, [children...])`,
/// and a leaf child is written as a bare expression.
///
/// # Examples
///
/// ```
/// use sprig::tree_node;
///
/// let etc = tree_node! {
///     "etc", [
///         "hosts",
///         /("ssh", [
///             "ssh_config",
///             /("ssh_config.d", [
///                 "10-local.conf",
///             ]),
///         ]),
///         "fstab",
///     ]
/// };
///
/// assert_eq!(etc.degree(), 3);
/// assert_eq!(etc.size(), 7);
/// assert_eq!(
///     etc.each().map(|node| *node.borrow_value()).collect::<Vec<_>>(),
///     [
///         "etc",
///         "hosts",
///         "ssh",
///         "ssh_config",
///         "ssh_config.d",
///         "10-local.conf",
///         "fstab",
///     ]
/// );
///
/// // A single value makes a lone root.
/// let lone = tree_node!(42);
/// assert!(lone.is_leaf() && lone.is_root());
/// ```
#[macro_export]
macro_rules! tree_node {
    () => {
        compile_error!("tree should have a root node")
    };
    (@@append_child, $parent:ident, []) => {};
    (@@append_child, $parent:ident, [/($value:expr, [$($descendants:tt)*]) $(, $($rest:tt)*)?]) => {{
        let node = $crate::tree_node!($value, [$($descendants)*]);
        $parent
            .append_child_node(&node)
            .expect("[validity] a new root can be attached to an unfrozen node");
        $crate::tree_node!(@@append_child, $parent, [$($($rest)*)?]);
    }};
    (@@append_child, $parent:ident, [$value:expr $(, $($rest:tt)*)?]) => {{
        $parent
            .append_child($value)
            .expect("[validity] a child can be created under an unfrozen node");
        $crate::tree_node!(@@append_child, $parent, [$($($rest)*)?]);
    }};
    ($value:expr) => {
        $crate::Node::new($value)
    };
    ($value:expr, [$($children:tt)*]) => {{
        let root = $crate::Node::new($value);
        $crate::tree_node!(@@append_child, root, [$($children)*]);
        root
    }};
}
