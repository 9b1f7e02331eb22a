//! Rooted, ordered trees with O(1) structural edits and a one-way freeze.
//!
//! # Concepts
//!
//! ## Nodes
//!
//! [`Node`] is a handle to a node. Cloning the handle does not clone the
//! node: two handles may refer to the same node, which can be checked with
//! [`Node::ptr_eq`]. A node is created as a root of its own single-node
//! tree, and is connected to others with methods such as
//! [`Node::append_child`] and [`Node::append_sibling`].
//!
//! ```
//! use sprig::Node;
//!
//! let root = Node::new("root");
//! root.append_child("a")?.append_child("c")?;
//! root.first_child().expect("`root` has children").append_child("b")?;
//! //  root
//! //  |-- a
//! //  |   `-- b
//! //  `-- c
//!
//! assert_eq!(root.size(), 4);
//! assert_eq!(root.degree(), 2);
//! assert_eq!(root.max_depth(), 2);
//! # Ok::<_, sprig::NodeError>(())
//! ```
//!
//! ## Ownership
//!
//! A parent owns its children, and the references toward the parent and the
//! previous sibling are weak. So, a handle to a node keeps the node and its
//! descendants alive, but not its ancestors.
//!
//! ```
//! use sprig::tree_node;
//!
//! let root = tree_node! { "root", [/("a", ["b"])] };
//! let b = root.child(0)?.only_child()?;
//! assert!(!b.is_root());
//!
//! drop(root);
//! // Nothing refers to `root` and `a` anymore, so they are released.
//! // `b` is alive, and now it is a root of its own tree.
//! assert!(b.is_root());
//! # Ok::<_, sprig::NodeError>(())
//! ```
//!
//! ## Freezing
//!
//! [`Node::freeze`] makes the node and its descendants immutable forever.
//! Edits on frozen nodes fail with [`NodeError::Frozen`]. [`Tree`] freezes
//! the whole structure a node belongs to, and publishes it as a read-only
//! value with cached metrics.
//!
//! ```
//! use sprig::{tree_node, NodeError, Tree};
//!
//! let root = tree_node! { "root", ["a", "b"] };
//! let tree = Tree::from(&root);
//!
//! assert_eq!(tree.degree(), 2);
//! assert!(matches!(root.append_child("c"), Err(NodeError::Frozen)));
//! assert!(matches!(root.child(0)?.extract(), Err(NodeError::Frozen)));
//! # Ok::<_, NodeError>(())
//! ```
//!
//! # Usage
//!
//! To create a structure directly, use [`tree_node!`].
//!
//! ```
//! use sprig::tree_node;
//!
//! let root = tree_node! {
//!     "root", [
//!         "0",
//!         /("1", [
//!             /("1-0", [
//!                 "1-0-0"
//!             ]),
//!             "1-1",
//!         ]),
//!     ]
//! };
//!
//! assert_eq!(
//!     root.render_with(|node| *node.borrow_value()),
//!     "root\n├─╴0\n└─╴1\n   ├─╴1-0\n   │  └─╴1-0-0\n   └─╴1-1"
//! );
//! ```
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
// `clippy::missing_docs_in_private_items` implies `missing_docs`.
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::unwrap_used)]

extern crate alloc;

#[macro_use]
mod macros;

mod error;
pub mod node;
pub mod traverse;
pub mod tree;

pub use self::error::{Neighbor, NodeError, Result, StructureError};
pub use self::node::{Nested, Node, NodeId, PrettyPrint};
pub use self::tree::Tree;
