//! Tests for hierarchy edits, copy, combination, and freezing.

mod common;

use rstest::rstest;
use sprig::{tree_node, Node, NodeError, StructureError};

use self::common::values;

/// Returns true if the error is the given structure error.
fn is_structure_error(err: &NodeError, expected: StructureError) -> bool {
    err.as_structure() == Some(expected)
}

#[test]
fn append_and_prepend_children() {
    common::init_tracing();
    let root = Node::new(-1);
    root.append_child(1)
        .unwrap()
        .prepend_child(0)
        .unwrap()
        .append_child(2)
        .unwrap();
    assert_eq!(values(root.children()), [0, 1, 2]);
    assert_eq!(root.degree(), 3);
}

#[test]
fn empty_node_from_default() {
    let root: Node<String> = Node::default();
    root.append_child(String::new()).unwrap();
    assert!(root.borrow_value().is_empty());
    assert_eq!(root.degree(), 1);
}

#[test]
fn siblings_are_inserted_next_to_the_node() {
    common::init_tracing();
    let root = tree_node! { "root", ["b"] };
    let b = root.child(0).unwrap();
    b.append_sibling("d").unwrap().prepend_sibling("a").unwrap();
    b.next_sibling().unwrap().prepend_sibling("c").unwrap();

    assert_eq!(values(root.children()), ["a", "b", "c", "d"]);
    assert!(root.first_child().unwrap().is_first());
    assert_eq!(*root.last_child().unwrap().borrow_value(), "d");
    assert_eq!(values(root.children_reverse()), ["d", "c", "b", "a"]);
    assert!(root.children().all(|child| child.parent().unwrap().ptr_eq(&root)));
}

#[test]
fn root_cannot_have_siblings() {
    let root = Node::new("root");
    let err = root.append_sibling("x").unwrap_err();
    assert!(is_structure_error(&err, StructureError::SiblingsWithoutParent));
    let err = root.prepend_sibling_node(&Node::new("y")).unwrap_err();
    assert!(is_structure_error(&err, StructureError::SiblingsWithoutParent));
    assert!(root.is_leaf() && root.is_root());
}

#[test]
fn delete_middle_child() {
    common::init_tracing();
    let root = Node::new("root");
    root.append_child("a")
        .unwrap()
        .append_child("b")
        .unwrap()
        .append_child("c")
        .unwrap();
    let a = root.child(0).unwrap();
    let b = root.child(1).unwrap();
    let c = root.child(2).unwrap();

    let orphans = b.delete().unwrap();
    assert!(orphans.is_empty());
    assert!(a.next_sibling().unwrap().ptr_eq(&c));
    assert!(c.prev_sibling().unwrap().ptr_eq(&a));
    assert!(b.is_root());
    assert_eq!(root.degree(), 2);
}

#[test]
fn delete_only_child_leaves_the_parent_a_leaf() {
    let root = tree_node! { "root", [/("parent", ["only"])] };
    let parent = root.child(0).unwrap();
    let only = parent.only_child().unwrap();

    assert!(only.delete().unwrap().is_empty());
    assert!(parent.is_leaf());
    assert!(parent.first_child().is_none() && parent.last_child().is_none());
    assert!(only.is_root());
}

#[test]
fn delete_promotes_children_to_roots_in_order() {
    let root = tree_node! { "root", [/("x", ["x0", /("x1", ["x1-0"]), "x2"])] };
    let x = root.child(0).unwrap();

    let orphans = x.delete().unwrap();
    assert_eq!(values(orphans.iter().cloned()), ["x0", "x1", "x2"]);
    assert!(orphans.iter().all(|node| node.is_root() && node.is_first() && node.is_last()));
    assert_eq!(orphans[1].degree(), 1, "subtrees of the children survive");
    assert!(x.is_root() && x.is_leaf());
    assert!(root.is_leaf());
}

#[test]
fn extract_keeps_the_subtree() {
    let root = tree_node! { "root", [/("a", ["a0", "a1"]), "b"] };
    let a = root.child(0).unwrap();

    a.extract().unwrap();
    assert!(a.is_root());
    assert_eq!(values(a.each()), ["a", "a0", "a1"]);
    assert_eq!(values(root.each()), ["root", "b"]);
    assert!(root.child(0).unwrap().is_first());

    // Extracting a root is a no-op.
    a.extract().unwrap();
    assert_eq!(a.size(), 3);
}

#[test]
fn attach_existing_nodes() {
    let root = Node::new("root");
    let b = tree_node! { "b", ["b0"] };
    let a = Node::new("a");
    let c = Node::new("c");

    root.append_child_node(&b).unwrap().prepend_child_node(&a).unwrap();
    b.append_sibling_node(&c).unwrap();

    assert_eq!(values(root.each()), ["root", "a", "b", "b0", "c"]);
    assert!(b.parent().unwrap().ptr_eq(&root));
    assert!(!a.is_root());
}

#[rstest]
#[case::child_of_itself(0)]
#[case::child_of_descendant(1)]
#[case::sibling_of_descendant(2)]
fn attaching_an_ancestor_is_a_loop(#[case] variant: u8) {
    let root = tree_node! { "root", [/("a", ["b"])] };
    let b = root.child(0).unwrap().only_child().unwrap();

    let err = match variant {
        0 => root.append_child_node(&root),
        1 => b.prepend_child_node(&root),
        _ => b.append_sibling_node(&root),
    }
    .unwrap_err();
    assert!(is_structure_error(&err, StructureError::AncestorDescendantLoop));
    assert_eq!(values(root.each()), ["root", "a", "b"], "unchanged");
}

#[test]
fn attaching_a_non_root_fails() {
    let root = tree_node! { "root", ["a"] };
    let other = Node::new("other");
    let a = root.child(0).unwrap();

    let err = other.append_child_node(&a).unwrap_err();
    assert!(is_structure_error(&err, StructureError::NotRoot));
    assert!(a.parent().unwrap().ptr_eq(&root));
    assert!(other.is_leaf());
}

#[test]
fn combine_two_roots() {
    common::init_tracing();
    let x = Node::new("x");
    let y = Node::new("y");
    let z = (&x + &y).unwrap();

    assert!(z.is_root());
    assert_eq!(z.degree(), 2);
    assert_eq!(z.child(0).unwrap(), x);
    assert_eq!(z.child(1).unwrap(), y);
    assert!(z.child(0).unwrap().ptr_eq(&x));
    assert!(z.child(1).unwrap().ptr_eq(&y));
    assert_eq!(*z.borrow_value(), "");
}

#[test]
fn combine_with_value() {
    let x = tree_node! { 1, [2] };
    let y = Node::new(3);
    let z = x.combine(&y, 0).unwrap();
    assert_eq!(values(z.each()), [0, 1, 2, 3]);
}

#[test]
fn combine_requires_roots() {
    let root = tree_node! { "root", ["a"] };
    let a = root.child(0).unwrap();
    let err = (&a + &Node::new("b")).unwrap_err();
    assert!(is_structure_error(&err, StructureError::NotRoot));
    let err = (&Node::new("b") + &a).unwrap_err();
    assert!(is_structure_error(&err, StructureError::NotRoot));
    assert!(a.parent().unwrap().ptr_eq(&root));
}

#[test]
fn combine_with_itself_copies_the_right_operand() {
    let x = tree_node! { "x", ["x0"] };
    let z = (&x + &x).unwrap();

    assert!(z.child(0).unwrap().ptr_eq(&x));
    assert!(!z.child(1).unwrap().ptr_eq(&x));
    assert_eq!(z.child(1).unwrap(), x);
    assert_eq!(z.size(), 5);
}

#[test]
fn combine_copies_frozen_operands() {
    let x = Node::new("x");
    let y = tree_node! { "y", ["y0"] };
    y.freeze();

    let z = (&x + &y).unwrap();
    let copied = z.child(1).unwrap();
    assert!(!copied.ptr_eq(&y));
    assert_eq!(copied, y);
    assert!(!copied.is_frozen());
    assert!(y.is_root(), "the frozen original is untouched");
    assert!(z.child(0).unwrap().ptr_eq(&x));
}

#[test]
fn deep_copy_is_equal_and_independent() {
    let root = tree_node! { "root", [/("a", ["b"]), "c"] };
    let copied = root.deep_copy();

    assert_eq!(copied, root);
    assert!(copied.is_root());
    assert!(copied.each().zip(root.each()).all(|(l, r)| !l.ptr_eq(&r)));

    copied.child(0).unwrap().append_child("new").unwrap();
    copied.child(1).unwrap().replace_value("changed").unwrap();
    assert_ne!(copied, root);
    assert_eq!(values(root.each()), ["root", "a", "b", "c"]);
}

#[test]
fn deep_copy_of_a_subtree_is_a_root() {
    let root = tree_node! { "root", [/("a", ["b"])] };
    let copied = root.child(0).unwrap().deep_copy();
    assert!(copied.is_root());
    assert_eq!(values(copied.each()), ["a", "b"]);
}

#[test]
fn deep_copy_of_frozen_is_mutable() {
    let root = tree_node! { "root", ["a"] };
    root.freeze();
    let copied = root.deep_copy();
    assert!(copied.each().all(|node| !node.is_frozen()));
    copied.append_child("b").unwrap();
}

#[test]
fn try_deep_copy_fails_on_borrowed_value() {
    let root = tree_node! { "root", ["a"] };
    let a = root.child(0).unwrap();
    let _guard = a.borrow_value_mut().unwrap();
    assert!(root.try_deep_copy().is_err());
}

#[test]
fn freeze_is_idempotent_and_transitive() {
    common::init_tracing();
    let root = tree_node! { "root", [/("a", ["b"]), "c"] };
    root.freeze();
    let snapshot = root.deep_copy();
    root.freeze();

    assert!(root.each().all(|node| node.is_frozen()));
    assert_eq!(root, snapshot);
}

#[test]
fn frozen_nodes_reject_every_mutation() {
    let root = tree_node! { "root", [/("a", ["b"]), "c"] };
    root.freeze();
    let a = root.child(0).unwrap();
    let b = a.only_child().unwrap();

    let results = [
        root.append_child("x").map(drop),
        root.prepend_child("x").map(drop),
        a.append_sibling("x").map(drop),
        a.prepend_sibling("x").map(drop),
        root.append_child_node(&Node::new("x")).map(drop),
        root.prepend_child_node(&Node::new("x")).map(drop),
        b.append_sibling_node(&Node::new("x")).map(drop),
        b.prepend_sibling_node(&Node::new("x")).map(drop),
        a.extract().map(drop),
        b.delete().map(drop),
        root.delete().map(drop),
        b.replace_value("x").map(drop),
        a.borrow_value_mut().map(drop),
    ];
    for result in results {
        assert!(matches!(result, Err(NodeError::Frozen)));
    }
    assert_eq!(values(root.each()), ["root", "a", "b", "c"]);
}

#[test]
fn frozen_node_cannot_be_attached() {
    let root = Node::new("root");
    let frozen = Node::new("frozen");
    frozen.freeze();
    assert!(matches!(
        root.append_child_node(&frozen),
        Err(NodeError::Frozen)
    ));
    assert!(root.is_leaf());
}

#[test]
fn frozen_only_child_pins_both_ends_of_the_chain() {
    let root = tree_node! { "root", [/("a", ["b"])] };
    let a = root.child(0).unwrap();
    a.freeze();

    assert!(!root.is_frozen());
    let results = [
        root.append_child("c").map(drop),
        root.prepend_child("c").map(drop),
        root.append_child_node(&Node::new("c")).map(drop),
        root.prepend_child_node(&Node::new("c")).map(drop),
        a.extract().map(drop),
        root.delete().map(drop),
    ];
    for result in results {
        assert!(matches!(result, Err(NodeError::Frozen)));
    }
    assert!(a.is_first() && a.is_last());
    assert_eq!(values(root.each()), ["root", "a", "b"]);
}

#[test]
fn frozen_sibling_keeps_its_links() {
    let root = tree_node! { "root", ["x", /("a", ["b"]), "y"] };
    let [x, a, y] = [0, 1, 2].map(|index| root.child(index).unwrap());
    a.freeze();

    let results = [
        x.append_sibling("n").map(drop),
        y.prepend_sibling("n").map(drop),
        x.append_sibling_node(&Node::new("n")).map(drop),
        y.prepend_sibling_node(&Node::new("n")).map(drop),
        x.extract().map(drop),
        y.delete().map(drop),
    ];
    for result in results {
        assert!(matches!(result, Err(NodeError::Frozen)));
    }
    assert!(a.prev_sibling().unwrap().ptr_eq(&x));
    assert!(a.next_sibling().unwrap().ptr_eq(&y));
    assert_eq!(values(root.children()), ["x", "a", "y"]);

    // Edits away from the frozen node are still allowed.
    x.prepend_sibling("w").unwrap();
    y.append_sibling("z").unwrap();
    root.child(0).unwrap().extract().unwrap();
    assert_eq!(values(root.children()), ["x", "a", "y", "z"]);
}

#[test]
fn mutable_borrow_blocks_freezing() {
    let root = tree_node! { String::from("root"), [String::from("a")] };
    let a = root.child(0).unwrap();
    let mut guard = a.borrow_value_mut().unwrap();

    assert!(matches!(root.try_freeze(), Err(NodeError::ValueInUse(_))));
    assert!(root.each().all(|node| !node.is_frozen()));

    guard.push_str("-edited");
    drop(guard);
    root.try_freeze().unwrap();
    assert!(matches!(a.borrow_value_mut(), Err(NodeError::Frozen)));
    assert_eq!(*a.borrow_value(), "a-edited");
}

#[test]
#[should_panic(expected = "should not be mutably borrowed")]
fn freeze_panics_on_mutable_borrow() {
    let node = Node::new(0);
    let _guard = node.borrow_value_mut().unwrap();
    node.freeze();
}

#[test]
fn value_access() {
    let node = Node::new(1);
    *node.borrow_value_mut().unwrap() += 1;
    assert_eq!(node.replace_value(10).unwrap(), 2);
    assert_eq!(*node.borrow_value(), 10);

    let _shared = node.borrow_value();
    assert!(matches!(
        node.borrow_value_mut(),
        Err(NodeError::BorrowValue(_))
    ));
}
