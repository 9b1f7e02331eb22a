//! Relinking primitives.
//!
//! These functions assume every precondition (freeze flags, rootness of the
//! inserted node, loop detection) has already been checked by the caller.
//! The only condition they detect themselves is a missing parent for sibling
//! insertion, which is checked before anything is touched.

use crate::error::StructureError;
use crate::node::internal::{Link, WeakLink};

/// Returns a weak link to the node, or an empty weak link.
fn weak_or_empty<T>(link: Option<&Link<T>>) -> WeakLink<T> {
    link.map_or_else(WeakLink::default, Link::weak)
}

/// Cuts the node out of its sibling chain, making it a root.
///
/// The node keeps its children. Roots are left as they are.
pub(super) fn unlink<T>(node: &Link<T>) {
    let Some(parent) = node.parent() else {
        return;
    };
    let prev = node.prev_sibling();
    let next = node.next_sibling();

    // Bridge the gap: prev (or parent) --> next.
    match &prev {
        Some(prev) => prev.set_next_sibling(next.clone()),
        None => parent.set_first_child(next.clone()),
    };
    // Bridge the gap: next (or parent) --> prev.
    match &next {
        Some(next) => next.set_prev_sibling(weak_or_empty(prev.as_ref())),
        None => parent.set_last_child(weak_or_empty(prev.as_ref())),
    };
    parent.dec_degree();

    node.set_parent(WeakLink::default());
    node.set_prev_sibling(WeakLink::default());
    node.set_next_sibling(None);
}

/// Puts the root `child` at the head of the child chain of `parent`.
pub(super) fn insert_as_first_child<T>(parent: &Link<T>, child: &Link<T>) {
    debug_assert!(child.is_root(), "only roots can be inserted");

    match parent.first_child() {
        Some(old_first) => {
            old_first.set_prev_sibling(child.weak());
            child.set_next_sibling(Some(old_first));
        }
        None => {
            parent.set_last_child(child.weak());
        }
    }
    parent.set_first_child(Some(child.clone()));
    child.set_parent(parent.weak());
    parent.inc_degree();
}

/// Puts the root `child` at the tail of the child chain of `parent`.
pub(super) fn insert_as_last_child<T>(parent: &Link<T>, child: &Link<T>) {
    debug_assert!(child.is_root(), "only roots can be inserted");

    match parent.last_child() {
        Some(old_last) => {
            child.set_prev_sibling(old_last.weak());
            old_last.set_next_sibling(Some(child.clone()));
        }
        None => {
            parent.set_first_child(Some(child.clone()));
        }
    }
    parent.set_last_child(child.weak());
    child.set_parent(parent.weak());
    parent.inc_degree();
}

/// Puts the root `node` right after `anchor`.
///
/// # Failures
///
/// Fails with [`StructureError::SiblingsWithoutParent`] if `anchor` is a
/// root.
pub(super) fn insert_after<T>(anchor: &Link<T>, node: &Link<T>) -> Result<(), StructureError> {
    let parent = anchor
        .parent()
        .ok_or(StructureError::SiblingsWithoutParent)?;
    let Some(next) = anchor.next_sibling() else {
        insert_as_last_child(&parent, node);
        return Ok(());
    };

    // anchor --> node --> next
    node.set_parent(parent.weak());
    node.set_prev_sibling(anchor.weak());
    next.set_prev_sibling(node.weak());
    node.set_next_sibling(Some(next));
    anchor.set_next_sibling(Some(node.clone()));
    parent.inc_degree();
    Ok(())
}

/// Puts the root `node` right before `anchor`.
///
/// # Failures
///
/// Fails with [`StructureError::SiblingsWithoutParent`] if `anchor` is a
/// root.
pub(super) fn insert_before<T>(anchor: &Link<T>, node: &Link<T>) -> Result<(), StructureError> {
    let parent = anchor
        .parent()
        .ok_or(StructureError::SiblingsWithoutParent)?;
    let Some(prev) = anchor.prev_sibling() else {
        insert_as_first_child(&parent, node);
        return Ok(());
    };

    // prev --> node --> anchor
    node.set_parent(parent.weak());
    node.set_prev_sibling(prev.weak());
    anchor.set_prev_sibling(node.weak());
    // Ownership of `anchor` moves from `prev` to `node`.
    let anchor_owned = prev.set_next_sibling(Some(node.clone()));
    node.set_next_sibling(anchor_owned);
    parent.inc_degree();
    Ok(())
}
