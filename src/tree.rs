mod node;
mod builder;
mod preorder;
mod inorder;
mod postorder;

pub use node::*;

pub(crate) use builder::PreorderBuilder;
pub(crate) use preorder::{Event, IterEvents};

use std::fmt;
use std::ptr;
use std::str::FromStr;
use std::collections::VecDeque;

use tracing::instrument;

use crate::codec::Codec;
use crate::error::ParseError;
use crate::value::Scalar;

use preorder::IterPreorder;
use inorder::IterInorder;
use postorder::IterPostorder;

/// A rooted binary tree
///
/// The tree owns its root node, and every node exclusively owns its children. Nothing about the
/// shape or ordering of the tree is enforced: callers build whatever structure they need with
/// [`Node`] (or the [`tree!`](crate::tree!) macro) and then query it.
///
/// Every operation is a read-only traversal using an explicit stack or queue, so the height of the
/// tree is never limited by the size of the call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTree<T> {
    root: Option<Node<T>>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self {
            root: None,
        }
    }
}

impl<T> From<Node<T>> for BinaryTree<T> {
    fn from(root: Node<T>) -> Self {
        Self::from_root(root)
    }
}

impl<T> From<Option<Node<T>>> for BinaryTree<T> {
    fn from(root: Option<Node<T>>) -> Self {
        Self {root}
    }
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::BinaryTree;
    ///
    /// let tree: BinaryTree<i32> = BinaryTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree rooted at the given node
    pub fn from_root(root: Node<T>) -> Self {
        Self {root: Some(root)}
    }

    /// Returns true if the tree has no root
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes in the tree
    ///
    /// Time complexity: `O(n)`
    pub fn len(&self) -> usize {
        IterPreorder::new(self.root()).count()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// Handles obtained from the root (or from [`find`](Self::find)) identify nodes for
    /// [`are_cousins`](Self::are_cousins) and
    /// [`lowest_common_ancestor`](Self::lowest_common_ancestor).
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    pub fn root_mut(&mut self) -> Option<&mut Node<T>> {
        self.root.as_mut()
    }

    /// Consumes the tree, returning its root node
    pub fn into_root(self) -> Option<Node<T>> {
        self.root
    }

    /// Returns the number of nodes on the shortest path from the root to a leaf, or 0 if the tree
    /// is empty
    ///
    /// Searches level by level, so it stops at the first (shallowest) leaf without visiting the
    /// rest of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [2, [4], _], [3]];
    /// assert_eq!(tree.min_depth(), 2);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn min_depth(&self) -> usize {
        let root = match self.root() {
            Some(root) => root,
            None => return 0,
        };

        let mut queue = VecDeque::new();
        queue.push_back((root, 1));
        // The queue only runs dry after its last node, which is always a leaf
        let mut depth = 1;
        while let Some((node, node_depth)) = queue.pop_front() {
            depth = node_depth;
            if node.is_leaf() {
                break;
            }

            queue.extend(node.left().map(|left| (left, depth + 1)));
            queue.extend(node.right().map(|right| (right, depth + 1)));
        }

        depth
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 if the tree
    /// is empty
    ///
    /// Time complexity: `O(n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [2, [4], _], [3]];
    /// assert_eq!(tree.max_depth(), 3);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn max_depth(&self) -> usize {
        let mut stack: Vec<_> = self.root().map(|root| (root, 1)).into_iter().collect();
        let mut max_depth = 0;

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.right().map(|right| (right, depth + 1)));
            stack.extend(node.left().map(|left| (left, depth + 1)));
        }

        max_depth
    }

    /// Returns true if `node1` and `node2` are cousins: nodes of this tree at the same depth with
    /// different parents
    ///
    /// Nodes are identified by reference, not by value. Returns false if either node is not part
    /// of this tree. Two children of the root are siblings, not cousins, and the root is never a
    /// cousin of itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [2, [4], _], [3, _, [5]]];
    /// let four = tree.find(&4).unwrap();
    /// let five = tree.find(&5).unwrap();
    /// assert!(tree.are_cousins(four, five));
    ///
    /// let two = tree.find(&2).unwrap();
    /// let three = tree.find(&3).unwrap();
    /// assert!(!tree.are_cousins(two, three));
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn are_cousins(&self, node1: &Node<T>, node2: &Node<T>) -> bool {
        let (path1, path2) = match (self.path_to(node1), self.path_to(node2)) {
            (Some(path1), Some(path2)) => (path1, path2),
            _ => return false,
        };

        if path1.len() != path2.len() {
            return false;
        }

        match (parent(&path1), parent(&path2)) {
            (Some(parent1), Some(parent2)) => !ptr::eq(parent1, parent2),
            // Both are the root, and the root has no parent to differ by
            _ => false,
        }
    }

    /// Returns the deepest node that has both `node1` and `node2` as descendants, where every node
    /// is a descendant of itself
    ///
    /// Nodes are identified by reference, not by value. Returns `None` if either node is not part
    /// of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [2, [4], [6]], [3, _, [5]]];
    /// let four = tree.find(&4).unwrap();
    /// let six = tree.find(&6).unwrap();
    /// let five = tree.find(&5).unwrap();
    ///
    /// let ancestor = tree.lowest_common_ancestor(four, six).unwrap();
    /// assert_eq!(ancestor.value(), &2);
    ///
    /// let ancestor = tree.lowest_common_ancestor(four, five).unwrap();
    /// assert_eq!(ancestor.value(), &1);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn lowest_common_ancestor(&self, node1: &Node<T>, node2: &Node<T>) -> Option<&Node<T>> {
        let path1 = self.path_to(node1)?;
        let path2 = self.path_to(node2)?;

        // Both paths start at the root, so they share at least one node
        let mut ancestor = None;
        for (&ancestor1, &ancestor2) in path1.iter().zip(&path2) {
            if !ptr::eq(ancestor1, ancestor2) {
                break;
            }
            ancestor = Some(ancestor1);
        }

        ancestor
    }

    /// Returns true if the given node is part of this tree
    pub fn contains(&self, node: &Node<T>) -> bool {
        self.path_to(node).is_some()
    }

    /// Returns every node from the root down to `target`, or `None` if `target` is not in the tree
    fn path_to(&self, target: &Node<T>) -> Option<Vec<&Node<T>>> {
        let mut path = Vec::new();
        let mut stack: Vec<_> = self.root().map(|root| (root, 0)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            // Drop the part of the path belonging to subtrees we have finished searching
            path.truncate(depth);
            path.push(node);

            if ptr::eq(node, target) {
                return Some(path);
            }

            stack.extend(node.right().map(|right| (right, depth + 1)));
            stack.extend(node.left().map(|left| (left, depth + 1)));
        }

        None
    }
}

/// Returns the second to last node of a path from the root, if any
fn parent<'a, T>(path: &[&'a Node<T>]) -> Option<&'a Node<T>> {
    path.len().checked_sub(2).map(|index| path[index])
}

impl<T: PartialEq> BinaryTree<T> {
    /// Returns the first node holding `value` in a depth-first, left-before-right (pre-order)
    /// search
    ///
    /// If several nodes hold the same value, the one returned is the first one found by that
    /// search, which may not be the one the caller had in mind.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [2, _, [7]], [7]];
    /// let seven = tree.find(&7).unwrap();
    /// // The 7 in the left subtree is found before the right child of the root
    /// let right = tree.root().and_then(|root| root.right()).unwrap();
    /// assert!(!std::ptr::eq(seven, right));
    /// assert!(tree.find(&8).is_none());
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        IterPreorder::new(self.root()).find(|node| node.value() == value)
    }
}

impl<T: Ord> BinaryTree<T> {
    /// Returns the smallest value in the tree that is strictly greater than `lower_bound`, or
    /// `None` if there is no such value
    ///
    /// The tree must be a binary search tree (see [`is_bst`](Self::is_bst)). The result is
    /// unspecified otherwise; debug builds assert the ordering.
    ///
    /// Time complexity: `O(h)` where `h` is the height of the tree
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![5, [3], [8]];
    /// assert_eq!(tree.next_larger(&4), Some(&5));
    /// assert_eq!(tree.next_larger(&5), Some(&8));
    /// assert_eq!(tree.next_larger(&8), None);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn next_larger(&self, lower_bound: &T) -> Option<&T> {
        debug_assert!(self.is_bst(), "next_larger requires a binary search tree");

        let mut result = None;
        let mut current = self.root();
        while let Some(node) = current {
            if node.value() > lower_bound {
                // Candidate found, but there may be a smaller one on the left
                result = Some(node.value());
                current = node.left();
            } else {
                current = node.right();
            }
        }

        result
    }

    /// Returns true if every node's value is greater than all values in its left subtree and less
    /// than all values in its right subtree
    ///
    /// An empty tree is a binary search tree.
    ///
    /// Time complexity: `O(n)`
    pub fn is_bst(&self) -> bool {
        let mut prev: Option<&T> = None;
        for node in IterInorder::new(self.root()) {
            match prev {
                Some(prev) if prev >= node.value() => return false,
                _ => prev = Some(node.value()),
            }
        }

        true
    }
}

impl<T: Scalar> BinaryTree<T> {
    /// Returns the largest sum of values along any downward path in the tree, or 0 if the tree is
    /// empty
    ///
    /// A path may start at any node and stop at any node below it, but it only ever moves from a
    /// parent to one of its children. In particular, a path never goes down both subtrees of a
    /// node. A single node is a valid path, so for a tree of only negative values the result is the
    /// largest of those values.
    ///
    /// Sums saturate at the bounds of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, [10], [10]];
    /// assert_eq!(tree.max_sum(), 11);
    ///
    /// let tree = tree![-5, [-3], _];
    /// assert_eq!(tree.max_sum(), -3);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn max_sum(&self) -> T {
        // Best sums of the downward paths starting at each finished subtree that has not been
        // consumed by its parent yet
        let mut sums: Vec<T> = Vec::new();
        let mut max_sum: Option<T> = None;

        for node in IterPostorder::new(self.root()) {
            // The right subtree finished after the left one, so its sum is on top
            let right = if node.has_right() { sums.pop() } else { None };
            let left = if node.has_left() { sums.pop() } else { None };

            let extension = left.into_iter().chain(right).fold(T::ZERO, Ord::max);
            let sum = node.value().saturating_add(extension);

            max_sum = Some(max_sum.map_or(sum, |max_sum| max_sum.max(sum)));
            sums.push(sum);
        }

        max_sum.unwrap_or(T::ZERO)
    }

    /// Encodes the tree with the canonical [`Codec`]
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::tree;
    ///
    /// let tree = tree![1, _, [2]];
    /// assert_eq!(tree.serialize(), "1,,2,,,,");
    /// ```
    pub fn serialize(&self) -> String {
        Codec::default().encode(self)
    }

    /// Decodes a tree produced by [`serialize`](Self::serialize)
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::{BinaryTree, ParseError, tree};
    ///
    /// let tree: BinaryTree<i32> = BinaryTree::deserialize("1,,2,,,,")?;
    /// assert_eq!(tree, tree![1, _, [2]]);
    ///
    /// let err = BinaryTree::<i32>::deserialize("1,,").unwrap_err();
    /// assert_eq!(err, ParseError::UnexpectedEnd { position: 3 });
    /// # Ok::<(), ParseError>(())
    /// ```
    pub fn deserialize(text: &str) -> Result<Self, ParseError> {
        Codec::default().decode(text)
    }
}

impl<T: Scalar> fmt::Display for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<T: Scalar> FromStr for BinaryTree<T> {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::deserialize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tree;

    /// ```text
    ///         5
    ///       /   \
    ///      3     8
    ///     / \
    ///    1   4
    ///   /
    ///  0
    /// ```
    fn sample() -> BinaryTree<i64> {
        tree![5, [3, [1, [0], _], [4]], [8]]
    }

    /// ```text
    ///       1
    ///     /   \
    ///    2     3
    ///   /       \
    ///  4         5
    /// ```
    fn cousins() -> BinaryTree<i32> {
        tree![1, [2, [4], _], [3, _, [5]]]
    }

    fn node<'a, T: PartialEq>(tree: &'a BinaryTree<T>, value: T) -> &'a Node<T> {
        tree.find(&value).expect("value should be in the tree")
    }

    #[test]
    fn empty_tree() {
        let tree: BinaryTree<i32> = BinaryTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.min_depth(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_eq!(tree.max_sum(), 0);
        assert_eq!(tree.next_larger(&0), None);
        assert_eq!(tree.find(&0), None);
        assert!(tree.is_bst());
        assert_eq!(tree, BinaryTree::default());
    }

    #[test]
    fn single_node() {
        let tree = BinaryTree::from_root(Node::new(-7));
        assert!(!tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.min_depth(), 1);
        assert_eq!(tree.max_depth(), 1);
        assert_eq!(tree.max_sum(), -7);

        let root = node(&tree, -7);
        assert!(!tree.are_cousins(root, root));
        assert!(ptr::eq(tree.lowest_common_ancestor(root, root).unwrap(), root));
    }

    #[test]
    fn depths() {
        let tree = sample();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.min_depth(), 2);
        assert_eq!(tree.max_depth(), 4);

        // Only the deep branch is left
        let tree = tree![5, [3, [1, [0], _], [4]], _];
        assert_eq!(tree.min_depth(), 3);
        assert_eq!(tree.max_depth(), 4);

        // A node with one child is not a leaf
        let tree = tree![1, _, [2, [3], _]];
        assert_eq!(tree.min_depth(), 3);
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn max_sum_paths() {
        assert_eq!(sample().max_sum(), 13);

        // Left and right branches are never joined through their parent
        assert_eq!(tree![1, [10], [10]].max_sum(), 11);

        // The best path does not have to start at the root
        assert_eq!(tree![-10, [2, [3], _], [4]].max_sum(), 5);

        // Negative subtrees are cut off
        assert_eq!(tree![2, [-1, [100], _], [-3]].max_sum(), 101);
        assert_eq!(tree![2, [-4, [3], _], [-3]].max_sum(), 3);

        // All negative: the best single node wins
        assert_eq!(tree![-5, [-3], _].max_sum(), -3);
        assert_eq!(tree![-5, [-8], [-9]].max_sum(), -5);
    }

    #[test]
    fn max_sum_is_at_least_every_value() {
        let tree = sample();
        let max_sum = tree.max_sum();
        for node in IterPreorder::new(tree.root()) {
            assert!(max_sum >= *node.value());
        }
    }

    #[test]
    fn max_sum_saturates() {
        let tree: BinaryTree<i8> = tree![100, [100], _];
        assert_eq!(tree.max_sum(), i8::MAX);

        let tree: BinaryTree<u8> = tree![0, [200, [200], _], [3]];
        assert_eq!(tree.max_sum(), u8::MAX);
    }

    #[test]
    fn next_larger_in_bst() {
        let tree = tree![5, [3], [8]];
        assert_eq!(tree.next_larger(&4), Some(&5));
        assert_eq!(tree.next_larger(&8), None);

        let tree = sample();
        assert_eq!(tree.next_larger(&-10), Some(&0));
        assert_eq!(tree.next_larger(&0), Some(&1));
        assert_eq!(tree.next_larger(&2), Some(&3));
        assert_eq!(tree.next_larger(&3), Some(&4));
        assert_eq!(tree.next_larger(&4), Some(&5));
        assert_eq!(tree.next_larger(&5), Some(&8));
        assert_eq!(tree.next_larger(&7), Some(&8));
        assert_eq!(tree.next_larger(&8), None);
        assert_eq!(tree.next_larger(&100), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "next_larger requires a binary search tree")]
    fn next_larger_outside_bst() {
        let tree = tree![1, [2], [3]];
        tree.next_larger(&0);
    }

    #[test]
    fn bst_ordering() {
        assert!(sample().is_bst());
        assert!(tree![1, _, [2, _, [3]]].is_bst());
        assert!(!tree![1, [2], [3]].is_bst());
        // Duplicates violate strict ordering
        assert!(!tree![2, [2], _].is_bst());
        // Ordering must hold against all ancestors, not just the parent
        assert!(!tree![5, [3, _, [6]], [8]].is_bst());
    }

    #[test]
    fn cousins_by_handle() {
        let tree = cousins();
        let (one, two, three, four, five) = (
            node(&tree, 1),
            node(&tree, 2),
            node(&tree, 3),
            node(&tree, 4),
            node(&tree, 5),
        );

        assert!(tree.are_cousins(four, five));
        assert!(tree.are_cousins(five, four));

        // Siblings
        assert!(!tree.are_cousins(two, three));
        // Different depths
        assert!(!tree.are_cousins(two, five));
        assert!(!tree.are_cousins(one, four));
        // Same node
        assert!(!tree.are_cousins(four, four));
        // Both root
        assert!(!tree.are_cousins(one, one));
    }

    #[test]
    fn cousins_outside_tree() {
        let tree = cousins();
        let other = cousins();
        let four = node(&tree, 4);
        let other_five = node(&other, 5);

        // Equal values do not make a node part of this tree
        assert!(!tree.contains(other_five));
        assert!(!tree.are_cousins(four, other_five));
        assert!(!tree.are_cousins(other_five, four));
    }

    #[test]
    fn lowest_common_ancestor() {
        let tree = sample();
        let (five, three, zero, four, eight) = (
            node(&tree, 5),
            node(&tree, 3),
            node(&tree, 0),
            node(&tree, 4),
            node(&tree, 8),
        );

        // Different subtrees of the root
        assert!(ptr::eq(tree.lowest_common_ancestor(zero, eight).unwrap(), five));
        assert!(ptr::eq(tree.lowest_common_ancestor(eight, four).unwrap(), five));
        // Different subtrees below the root
        assert!(ptr::eq(tree.lowest_common_ancestor(zero, four).unwrap(), three));
        // One is an ancestor of the other
        assert!(ptr::eq(tree.lowest_common_ancestor(three, zero).unwrap(), three));
        assert!(ptr::eq(tree.lowest_common_ancestor(zero, five).unwrap(), five));
        // Same node
        assert!(ptr::eq(tree.lowest_common_ancestor(four, four).unwrap(), four));
    }

    #[test]
    fn lowest_common_ancestor_outside_tree() {
        let tree = sample();
        let other = sample();
        let zero = node(&tree, 0);
        let other_four = node(&other, 4);

        assert_eq!(tree.lowest_common_ancestor(zero, other_four), None);
        assert_eq!(tree.lowest_common_ancestor(other_four, zero), None);
        assert_eq!(BinaryTree::new().lowest_common_ancestor(zero, zero), None);
    }

    #[test]
    fn find_returns_first_preorder_match() {
        let tree = tree![1, [2, _, [7]], [7]];
        let seven = node(&tree, 7);
        let left_seven = tree.root().and_then(Node::left).and_then(Node::right).unwrap();
        assert!(ptr::eq(seven, left_seven));
    }

    #[test]
    fn display_from_str() {
        let tree = sample();
        let text = tree.to_string();
        assert_eq!(text, tree.serialize());

        let parsed: BinaryTree<i64> = text.parse().unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn clone_and_modify() {
        let tree = sample();
        let mut cloned = tree.clone();
        assert_eq!(tree, cloned);

        if let Some(root) = cloned.root_mut() {
            *root.value_mut() = 6;
        }
        assert_ne!(tree, cloned);
        assert_eq!(cloned.into_root().map(|root| *root.value()), Some(6));
    }
}
