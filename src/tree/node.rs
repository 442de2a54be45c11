use std::fmt;
use std::mem;
use std::ptr;

use super::builder::PreorderBuilder;
use super::preorder::{Event, IterEvents};

/// A single node of a binary tree
///
/// Each node exclusively owns its left and right subtrees. There is no parent pointer: anything
/// that needs to know a node's parent computes it during a traversal from the root.
///
/// Dropping, cloning, comparing and debug-formatting nodes never recurses, so arbitrarily deep
/// (e.g. linked-list shaped) trees are fine.
pub struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// Creates a new leaf node
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Node;
    ///
    /// let node = Node::new(3);
    /// assert_eq!(node.value(), &3);
    /// assert!(node.is_leaf());
    /// ```
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Creates a new node that owns the given subtrees
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Node;
    ///
    /// let node = Node::with_children(1, None, Some(Node::new(2)));
    /// assert!(!node.has_left());
    /// assert_eq!(node.right().map(|right| *right.value()), Some(2));
    /// ```
    pub fn with_children(value: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub(crate) fn from_boxed_children(
        value: T,
        left: Option<Box<Node<T>>>,
        right: Option<Box<Node<T>>>,
    ) -> Self {
        Self {value, left, right}
    }

    /// Returns the value stored in this node
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns true if this node has a left child
    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    /// Returns true if this node has a right child
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns the left child
    ///
    /// The returned reference is a handle to a node of the enclosing tree, usable with
    /// [`BinaryTree::are_cousins`](crate::BinaryTree::are_cousins) and
    /// [`BinaryTree::lowest_common_ancestor`](crate::BinaryTree::lowest_common_ancestor).
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, a handle in the same sense as [`left`](Self::left)
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the left child for in-place modification
    pub fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.as_deref_mut()
    }

    pub fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.as_deref_mut()
    }

    /// Replaces the left subtree, returning the previous one
    pub fn set_left(&mut self, new_node: Option<Self>) -> Option<Self> {
        mem::replace(&mut self.left, new_node.map(Box::new)).map(|node| *node)
    }

    /// Replaces the right subtree, returning the previous one
    pub fn set_right(&mut self, new_node: Option<Self>) -> Option<Self> {
        mem::replace(&mut self.right, new_node.map(Box::new)).map(|node| *node)
    }

    /// Detaches and returns the left subtree
    pub fn take_left(&mut self) -> Option<Self> {
        self.left.take().map(|node| *node)
    }

    /// Detaches and returns the right subtree
    pub fn take_right(&mut self) -> Option<Self> {
        self.right.take().map(|node| *node)
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        // Detach every descendant before it is dropped so that each `drop` call only ever sees a
        // node with no children
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self::from_boxed_children(
            self.value.clone(),
            clone_subtree(self.left()),
            clone_subtree(self.right()),
        )
    }
}

fn clone_subtree<T: Clone>(root: Option<&Node<T>>) -> Option<Box<Node<T>>> {
    let mut builder = PreorderBuilder::new();
    for event in IterEvents::new(root) {
        match event {
            Event::Enter(node) => { builder.push(Some(node.value.clone())); },
            Event::Empty => { builder.push(None); },
            Event::Leave => {},
        }
    }

    // A full walk always completes the builder, so only the empty subtree comes back as `None`
    builder.finish().flatten()
}

/// Formats like the `subtree!` literal that would build this node: `Node(1, Node(2), _)`
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a, T> {
            Node(&'a Node<T>),
            Text(&'static str),
        }

        fn slot<T>(node: Option<&Node<T>>) -> Step<'_, T> {
            match node {
                Some(node) => Step::Node(node),
                None => Step::Text("_"),
            }
        }

        let mut stack = vec![Step::Node(self)];
        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Node(node) => node,
                Step::Text(text) => {
                    f.write_str(text)?;
                    continue;
                },
            };

            f.write_str("Node(")?;
            fmt::Debug::fmt(&node.value, f)?;
            if node.is_leaf() {
                f.write_str(")")?;
                continue;
            }

            stack.push(Step::Text(")"));
            stack.push(slot(node.right()));
            stack.push(Step::Text(", "));
            stack.push(slot(node.left()));
            stack.push(Step::Text(", "));
        }

        Ok(())
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((left, right)) = stack.pop() {
            // Identical nodes are trivially equal (similar to `Arc` using `ptr_eq` to optimize its
            // `PartialEq` impl)
            if ptr::eq(left, right) {
                continue;
            }

            if left.value != right.value {
                return false;
            }

            for (a, b) in [(left.left(), right.left()), (left.right(), right.right())] {
                match (a, b) {
                    (Some(a), Some(b)) => stack.push((a, b)),
                    (None, None) => {},
                    _ => return false,
                }
            }
        }

        true
    }
}

impl<T: Eq> Eq for Node<T> {}
