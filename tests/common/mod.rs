#![allow(dead_code)]

use std::env;
use std::sync::Once;

use rand::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{fmt::{self, format::FmtSpan}, prelude::*, EnvFilter};

use bintree::{BinaryTree, Node};
use simple_bintree::{SimpleBinaryTree, SimpleNode};

static TEST_SETUP: Once = Once::new();

/// Installs a global tracing subscriber for the test binary, once
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else {
            subscriber.try_init().unwrap_or_else(|e| {
                eprintln!("Error: Failed to set up logging: {}", e);
            });
        }

        info!("Test Setup complete");
    });
}

/// Builds the same random tree in both implementations
///
/// Values are distinct and drawn from `-100..100`. If `bst` is true the tree is a binary search
/// tree, otherwise values are placed in random order.
pub fn random_tree_pair<R: Rng>(rng: &mut R, len: usize, bst: bool) -> (BinaryTree<i64>, SimpleBinaryTree<i64>) {
    let mut values: Vec<i64> = (-100..100).collect();
    values.shuffle(rng);
    values.truncate(len);
    if bst {
        values.sort_unstable();
    }

    let (root, simple_root) = build(rng, &values);
    (BinaryTree::from(root), SimpleBinaryTree::from(simple_root))
}

/// Builds a subtree from `values` in in-order, picking a random node of each slice as its root
fn build<R: Rng>(rng: &mut R, values: &[i64]) -> (Option<Node<i64>>, Option<SimpleNode<i64>>) {
    if values.is_empty() {
        return (None, None);
    }

    let index = rng.gen_range(0..values.len());
    let (left, simple_left) = build(rng, &values[..index]);
    let (right, simple_right) = build(rng, &values[index + 1..]);

    let value = values[index];
    (
        Some(Node::with_children(value, left, right)),
        Some(SimpleNode::new(value, simple_left, simple_right)),
    )
}

/// A tree where every node only has a right child: `0 -> 1 -> 2 -> ...`
///
/// This is a binary search tree whose height is its length.
pub fn right_chain(len: usize) -> BinaryTree<i64> {
    let mut root = None;
    for value in (0..len as i64).rev() {
        root = Some(Node::with_children(value, None, root));
    }
    BinaryTree::from(root)
}
