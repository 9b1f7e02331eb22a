//! Pretty printing of a subtree.

use core::convert::Infallible;
use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use crate::node::Node;
use crate::traverse::DftEvent;

/// Branch to a child that has following siblings.
const BRANCH: &str = "├─╴";
/// Branch to the last child.
const LAST_BRANCH: &str = "└─╴";
/// Guide under a branch that has following siblings.
const GUIDE: &str = "│  ";
/// Guide under the last branch.
const NO_GUIDE: &str = "   ";

/// A wrapper to make a subtree printable as a tree diagram.
///
/// ```text
/// a
/// ├─╴b
/// │  └─╴d
/// └─╴c
/// ```
///
/// Each node is printed on its own line, labelled by the label function.
/// The lines are separated by `\n`, and there is no trailing newline.
#[derive(Clone, Copy)]
pub struct PrettyPrint<'a, T, F> {
    /// The top node of the subtree to print.
    node: &'a Node<T>,
    /// Label function.
    label: F,
}

impl<'a, T, F, L> PrettyPrint<'a, T, F>
where
    F: Fn(&Node<T>) -> L,
    L: fmt::Display,
{
    /// Creates a new `PrettyPrint`.
    #[inline]
    #[must_use]
    pub(super) fn new(node: &'a Node<T>, label: F) -> Self {
        Self { node, label }
    }

    /// Returns the printed lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let result: Result<(), Infallible> = self.for_each_line(|prefix, node| {
            lines.push(format!("{prefix}{}", (self.label)(node)));
            Ok(())
        });
        match result {
            Ok(()) => lines,
            Err(never) => match never {},
        }
    }

    /// Calls `f` with the prefix and the node, for each line in order.
    fn for_each_line<E>(
        &self,
        mut f: impl FnMut(&str, &Node<T>) -> Result<(), E>,
    ) -> Result<(), E> {
        // Whether each ancestor branch (below the top node) is the last one.
        let mut is_last_stack: Vec<bool> = Vec::new();
        let mut prefix = String::new();
        for ev in self.node.depth_first_traverse() {
            match ev {
                DftEvent::Open(node) if node.ptr_eq(self.node) => f("", &node)?,
                DftEvent::Open(node) => {
                    prefix.clear();
                    for &is_last in &is_last_stack {
                        prefix.push_str(if is_last { NO_GUIDE } else { GUIDE });
                    }
                    let is_last = node.is_last();
                    prefix.push_str(if is_last { LAST_BRANCH } else { BRANCH });
                    f(&prefix, &node)?;
                    is_last_stack.push(is_last);
                }
                DftEvent::Close(node) if node.ptr_eq(self.node) => {}
                DftEvent::Close(_) => {
                    is_last_stack.pop();
                }
            }
        }
        Ok(())
    }
}

impl<T, F, L> fmt::Display for PrettyPrint<'_, T, F>
where
    F: Fn(&Node<T>) -> L,
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut is_first_line = true;
        self.for_each_line(|prefix, node| {
            if !is_first_line {
                f.write_str("\n")?;
            }
            is_first_line = false;
            write!(f, "{prefix}{}", (self.label)(node))
        })
    }
}

impl<T, F, L> fmt::Debug for PrettyPrint<'_, T, F>
where
    F: Fn(&Node<T>) -> L,
    L: fmt::Display,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
