//! Utilities shared among integration tests.
#![allow(dead_code)]

use std::sync::Once;

use sprig::Node;
use tracing_subscriber::EnvFilter;

/// Guard to install the subscriber only once per test binary.
static INIT_TRACING: Once = Once::new();

/// Installs a global tracing subscriber whose output is captured by the test
/// harness.
///
/// The filter is read from `RUST_LOG`, e.g. `RUST_LOG=sprig=trace`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        // Another test harness may have installed a subscriber already.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Collects the values of the given nodes.
pub fn values<T: Copy>(nodes: impl IntoIterator<Item = Node<T>>) -> Vec<T> {
    nodes.into_iter().map(|node| *node.borrow_value()).collect()
}

/// Builds a tree of `choices.len() + 1` nodes.
///
/// The node `i + 1` is attached as the last child of the node
/// `choices[i] % (i + 1)`, and has the value `i + 1`. Returns the root and
/// every node in the order of creation.
pub fn build_from_choices(choices: &[usize]) -> (Node<usize>, Vec<Node<usize>>) {
    let root = Node::new(0);
    let mut nodes = vec![root.clone()];
    for (i, choice) in choices.iter().enumerate() {
        let parent = nodes[choice % (i + 1)].clone();
        parent.append_child(i + 1).expect("not frozen");
        nodes.push(parent.last_child().expect("just appended"));
    }
    (root, nodes)
}
