//! Tests for structural queries and traversals.

mod common;

use rstest::{fixture, rstest};
use sprig::traverse::DftEvent::{Close, Open};
use sprig::{tree_node, Neighbor, Nested, Node, NodeError};

use self::common::values;

//  root
//  |-- a
//  |   `-- b
//  `-- c
#[fixture]
fn sample() -> Node<&'static str> {
    common::init_tracing();
    tree_node! { "root", [/("a", ["b"]), "c"] }
}

#[rstest]
fn sizes_and_depths(sample: Node<&'static str>) {
    let a = sample.child(0).unwrap();
    let b = a.only_child().unwrap();

    assert_eq!(sample.size(), 4);
    assert_eq!(sample.degree(), 2);
    assert_eq!(b.depth(), 2);
    assert_eq!(sample.depth(), 0);
    assert_eq!(sample.max_depth(), 2);
    assert_eq!(a.max_depth(), 1);
    assert_eq!(sample.max_degree(), 2);
    assert_eq!(a.size(), 2);
    assert!(b.root().ptr_eq(&sample));
    assert!(sample.root().ptr_eq(&sample));
}

#[rstest]
fn predicates(sample: Node<&'static str>) {
    let a = sample.child(0).unwrap();
    let b = a.only_child().unwrap();
    let c = sample.child(1).unwrap();

    assert!(sample.is_root() && sample.is_first() && sample.is_last());
    assert!(sample.is_internal() && !sample.is_leaf());
    assert!(!a.is_root() && a.is_first() && !a.is_last() && a.is_internal());
    assert!(b.is_first() && b.is_last() && b.is_leaf());
    assert!(!c.is_first() && c.is_last() && c.is_leaf());
}

#[rstest]
#[case(0, "a")]
#[case(1, "c")]
#[case(-1, "c")]
#[case(-2, "a")]
fn child_by_index(sample: Node<&'static str>, #[case] index: isize, #[case] expected: &str) {
    assert_eq!(*sample.child(index).unwrap().borrow_value(), expected);
}

#[rstest]
#[case(2)]
#[case(-3)]
#[case(isize::MAX)]
#[case(isize::MIN)]
fn child_index_out_of_range(sample: Node<&'static str>, #[case] index: isize) {
    assert!(matches!(
        sample.child(index),
        Err(NodeError::IndexOutOfRange { index: i, degree: 2 }) if i == index
    ));
}

#[rstest]
fn leaf_has_no_child_at_any_index(sample: Node<&'static str>) {
    let c = sample.child(-1).unwrap();
    assert!(matches!(
        c.child(0),
        Err(NodeError::IndexOutOfRange { index: 0, degree: 0 })
    ));
    assert!(matches!(
        c.child(-1),
        Err(NodeError::IndexOutOfRange { index: -1, degree: 0 })
    ));
}

#[rstest]
fn only_child_requires_degree_one(sample: Node<&'static str>) {
    let a = sample.child(0).unwrap();
    let c = sample.child(1).unwrap();

    assert_eq!(*a.only_child().unwrap().borrow_value(), "b");
    assert!(matches!(
        sample.only_child(),
        Err(NodeError::InvalidArgument { degree: 2 })
    ));
    assert!(matches!(
        c.only_child(),
        Err(NodeError::InvalidArgument { degree: 0 })
    ));
}

#[rstest]
fn neighbors_at_boundaries(sample: Node<&'static str>) {
    let a = sample.child(0).unwrap();
    let c = sample.child(1).unwrap();

    assert!(a.next_sibling().unwrap().ptr_eq(&c));
    assert!(c.prev_sibling().unwrap().ptr_eq(&a));
    assert!(c.parent().unwrap().ptr_eq(&sample));
    assert!(matches!(
        sample.parent(),
        Err(NodeError::OutOfBounds(Neighbor::Parent))
    ));
    assert!(matches!(
        a.prev_sibling(),
        Err(NodeError::OutOfBounds(Neighbor::PrevSibling))
    ));
    assert!(matches!(
        c.next_sibling(),
        Err(NodeError::OutOfBounds(Neighbor::NextSibling))
    ));
    assert!(matches!(
        sample.next_sibling(),
        Err(NodeError::OutOfBounds(Neighbor::NextSibling))
    ));
    assert!(sample.first_child().unwrap().ptr_eq(&a));
    assert!(sample.last_child().unwrap().ptr_eq(&c));
    assert!(c.first_child().is_none() && c.last_child().is_none());
}

#[rstest]
fn ancestors_nearest_first(sample: Node<&'static str>) {
    let b = sample.child(0).unwrap().only_child().unwrap();
    assert_eq!(values(b.ancestors()), ["a", "root"]);
    assert_eq!(sample.ancestors().count(), 0);
}

#[rstest]
fn children_in_both_directions(sample: Node<&'static str>) {
    assert_eq!(values(sample.children()), ["a", "c"]);
    assert_eq!(values(sample.children_reverse()), ["c", "a"]);
    assert_eq!(sample.children().len(), sample.degree());
}

#[rstest]
fn preorder_leaves_and_edges(sample: Node<&'static str>) {
    assert_eq!(values(sample.each()), ["root", "a", "b", "c"]);
    assert_eq!(values(sample.to_flat()), ["root", "a", "b", "c"]);
    assert_eq!(values(sample.leaves()), ["b", "c"]);
    assert_eq!(values(sample.leaves_reverse()), ["c", "b"]);

    let edges: Vec<_> = sample
        .edges()
        .map(|(parent, child)| (*parent.borrow_value(), *child.borrow_value()))
        .collect();
    assert_eq!(edges, [("root", "a"), ("a", "b"), ("root", "c")]);
}

#[rstest]
fn traversals_of_a_subtree_stay_inside(sample: Node<&'static str>) {
    let a = sample.child(0).unwrap();
    assert_eq!(values(a.each()), ["a", "b"]);
    assert_eq!(values(a.leaves()), ["b"]);
    assert_eq!(a.edges().count(), 1);

    let c = sample.child(1).unwrap();
    assert_eq!(values(c.leaves()), ["c"]);
    assert_eq!(c.edges().count(), 0);
}

#[rstest]
fn traversals_restart_afresh(sample: Node<&'static str>) {
    let mut first = sample.each();
    first.next();
    assert_eq!(values(sample.each()), ["root", "a", "b", "c"]);
    assert_eq!(values(first), ["a", "b", "c"]);
}

#[rstest]
fn depth_first_events(sample: Node<&'static str>) {
    let events: Vec<_> = sample
        .depth_first_traverse()
        .map(|ev| ev.map(|node| *node.borrow_value()))
        .collect();
    assert_eq!(
        events,
        [
            Open("root"),
            Open("a"),
            Open("b"),
            Close("b"),
            Close("a"),
            Open("c"),
            Close("c"),
            Close("root"),
        ]
    );

    let mut reversed: Vec<_> = sample
        .depth_first_reverse_traverse()
        .map(|ev| ev.map(|node| *node.borrow_value()))
        .collect();
    reversed.reverse();
    assert_eq!(reversed, events);
}

#[rstest]
fn nested_structure(sample: Node<&'static str>) {
    let nested = sample.to_nested();
    assert!(nested.node().ptr_eq(&sample));

    let children = nested.children();
    assert_eq!(children.len(), 2);
    match &children[0] {
        Nested::Internal(a, grandchildren) => {
            assert_eq!(*a.borrow_value(), "a");
            assert!(matches!(&grandchildren[..], [Nested::Leaf(b)] if *b.borrow_value() == "b"));
        }
        Nested::Leaf(_) => panic!("`a` has a child"),
    }
    assert!(matches!(&children[1], Nested::Leaf(c) if *c.borrow_value() == "c"));
    assert!(matches!(Node::new(0).to_nested(), Nested::Leaf(_)));
}

#[rstest]
fn structural_equality(sample: Node<&'static str>) {
    let same = tree_node! { "root", [/("a", ["b"]), "c"] };
    let different_value = tree_node! { "root", [/("a", ["x"]), "c"] };
    let different_shape = tree_node! { "root", ["a", "b", "c"] };

    assert_eq!(sample, same);
    assert_ne!(sample, different_value);
    assert_ne!(sample, different_shape);
    assert_ne!(sample.child(0).unwrap(), sample);
    assert!(sample.try_eq(&same).unwrap());
}

#[rstest]
fn identifiers_are_unique(sample: Node<&'static str>) {
    let mut ids: Vec<_> = sample.each().map(|node| node.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}
