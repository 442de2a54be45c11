//! A binary tree with depth, path-sum, successor, relationship and serialization queries
//!
//! ```
//! use bintree::{BinaryTree, tree};
//!
//! //        5
//! //      /   \
//! //     3     8
//! //    / \
//! //   1   4
//! let tree = tree![5, [3, [1], [4]], [8]];
//!
//! assert_eq!(tree.min_depth(), 2);
//! assert_eq!(tree.max_depth(), 3);
//! assert_eq!(tree.max_sum(), 13);
//! assert_eq!(tree.next_larger(&4), Some(&5));
//!
//! let text = tree.serialize();
//! assert_eq!(BinaryTree::deserialize(&text), Ok(tree));
//! ```

pub mod tree;
pub mod codec;

mod error;
mod value;

pub use tree::{BinaryTree, Node};
pub use codec::{Codec, CodecSettings};
pub use error::{ConfigError, ParseError};
pub use value::Scalar;

/// Builds an `Option<Node>` from a literal description of a subtree
///
/// `_` is an absent subtree, a single value is a leaf, and `value, left, right` is a node with two
/// subtrees. Nested subtrees are wrapped in brackets.
///
/// # Examples
///
/// ```
/// use bintree::{Node, subtree};
///
/// let node = subtree![1, [2], _].unwrap();
/// assert_eq!(node, Node::with_children(1, Some(Node::new(2)), None));
/// ```
#[macro_export(local_inner_macros)]
macro_rules! subtree {
    (_) => (::std::option::Option::None);

    ([$($inner:tt)*]) => (subtree!($($inner)*));

    ($value:expr) => (::std::option::Option::Some($crate::Node::new($value)));

    ($value:expr, $left:tt, $right:tt) => {
        ::std::option::Option::Some($crate::Node::with_children(
            $value,
            subtree!($left),
            subtree!($right),
        ))
    };
}

/// Builds a `BinaryTree` from a literal description of its shape
///
/// Uses the same syntax as [`subtree!`]. `tree![]` (or `tree![_]`) is the empty tree.
///
/// # Examples
///
/// ```
/// use bintree::tree;
///
/// //       1
/// //     /   \
/// //    2     3
/// //   /       \
/// //  4         5
/// let tree = tree![1, [2, [4], _], [3, _, [5]]];
/// assert_eq!(tree.max_depth(), 3);
/// ```
#[macro_export(local_inner_macros)]
macro_rules! tree {
    () => ($crate::BinaryTree::new());

    ($($node:tt)+) => ($crate::BinaryTree::from(subtree!($($node)+)));
}
