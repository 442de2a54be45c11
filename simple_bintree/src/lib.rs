//! A "simple" binary tree where every operation is a plain recursive function
//!
//! Nodes are identified by value, so trees are expected to hold distinct values. Recursion depth
//! is the height of the tree, so this is only suitable for small, reasonably shaped trees.
//!
//! Used to test the `bintree` crate

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleNode<T> {
    pub value: T,
    pub left: Option<Box<SimpleNode<T>>>,
    pub right: Option<Box<SimpleNode<T>>>,
}

impl<T> SimpleNode<T> {
    pub fn new(value: T, left: Option<SimpleNode<T>>, right: Option<SimpleNode<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBinaryTree<T> {
    root: Option<SimpleNode<T>>,
}

impl<T> Default for SimpleBinaryTree<T> {
    fn default() -> Self {
        Self {root: None}
    }
}

impl<T> From<Option<SimpleNode<T>>> for SimpleBinaryTree<T> {
    fn from(root: Option<SimpleNode<T>>) -> Self {
        Self {root}
    }
}

impl<T> SimpleBinaryTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&SimpleNode<T>> {
        self.root.as_ref()
    }

    pub fn len(&self) -> usize {
        fn len<T>(node: Option<&SimpleNode<T>>) -> usize {
            node.map_or(0, |node| 1 + len(node.left()) + len(node.right()))
        }

        len(self.root())
    }

    pub fn min_depth(&self) -> usize {
        fn min_depth<T>(node: &SimpleNode<T>) -> usize {
            // Only paths that end at a leaf count, so a missing child is not a candidate
            let left = node.left().map(min_depth);
            let right = node.right().map(min_depth);
            1 + left.into_iter().chain(right).min().unwrap_or(0)
        }

        self.root().map_or(0, min_depth)
    }

    pub fn max_depth(&self) -> usize {
        fn max_depth<T>(node: Option<&SimpleNode<T>>) -> usize {
            match node {
                Some(node) => 1 + max_depth(node.left()).max(max_depth(node.right())),
                None => 0,
            }
        }

        max_depth(self.root())
    }
}

impl<T: Copy + Ord + Default + Add<Output=T>> SimpleBinaryTree<T> {
    pub fn max_sum(&self) -> T {
        /// Returns the best sum of a path starting at `node`, and the best sum of any path in the
        /// subtree rooted at `node`
        fn max_sum<T: Copy + Ord + Default + Add<Output=T>>(node: &SimpleNode<T>) -> (T, T) {
            let left = node.left().map(max_sum);
            let right = node.right().map(max_sum);

            let mut from_here = node.value;
            let mut best = node.value;
            for (child_from_here, child_best) in left.into_iter().chain(right) {
                from_here = from_here.max(node.value + child_from_here);
                best = best.max(child_best);
            }

            (from_here, best.max(from_here))
        }

        self.root().map_or(T::default(), |root| max_sum(root).1)
    }
}

impl<T: Copy + Ord> SimpleBinaryTree<T> {
    /// Scans the entire tree, so works for any tree, not just binary search trees
    pub fn next_larger(&self, lower_bound: T) -> Option<T> {
        fn next_larger<T: Copy + Ord>(node: Option<&SimpleNode<T>>, lower_bound: T) -> Option<T> {
            let node = node?;
            let here = Some(node.value).filter(|&value| value > lower_bound);
            [here, next_larger(node.left(), lower_bound), next_larger(node.right(), lower_bound)]
                .iter()
                .flatten()
                .copied()
                .min()
        }

        next_larger(self.root(), lower_bound)
    }

    pub fn is_bst(&self) -> bool {
        fn is_bst<T: Copy + Ord>(node: Option<&SimpleNode<T>>, lower: Option<T>, upper: Option<T>) -> bool {
            let node = match node {
                Some(node) => node,
                None => return true,
            };

            lower.map_or(true, |lower| node.value > lower)
                && upper.map_or(true, |upper| node.value < upper)
                && is_bst(node.left(), lower, Some(node.value))
                && is_bst(node.right(), Some(node.value), upper)
        }

        is_bst(self.root(), None, None)
    }
}

impl<T: Copy + PartialEq> SimpleBinaryTree<T> {
    /// Returns true if the first nodes holding each value are at the same level with different
    /// parents
    pub fn are_cousins(&self, value1: T, value2: T) -> bool {
        /// Returns the level and parent value of the first node (in pre-order) holding `target`
        fn locate<T: Copy + PartialEq>(
            node: Option<&SimpleNode<T>>,
            target: T,
            parent: Option<T>,
            level: usize,
        ) -> Option<(usize, Option<T>)> {
            let node = node?;
            if node.value == target {
                return Some((level, parent));
            }

            locate(node.left(), target, Some(node.value), level + 1)
                .or_else(|| locate(node.right(), target, Some(node.value), level + 1))
        }

        match (locate(self.root(), value1, None, 0), locate(self.root(), value2, None, 0)) {
            (Some((level1, Some(parent1))), Some((level2, Some(parent2)))) => {
                level1 == level2 && parent1 != parent2
            },
            _ => false,
        }
    }

    pub fn lowest_common_ancestor(&self, value1: T, value2: T) -> Option<T> {
        fn contains<T: Copy + PartialEq>(node: Option<&SimpleNode<T>>, target: T) -> bool {
            node.map_or(false, |node| {
                node.value == target || contains(node.left(), target) || contains(node.right(), target)
            })
        }

        fn find_lca<T: Copy + PartialEq>(node: Option<&SimpleNode<T>>, value1: T, value2: T) -> Option<T> {
            let node = node?;
            if node.value == value1 || node.value == value2 {
                return Some(node.value);
            }

            let left = find_lca(node.left(), value1, value2);
            let right = find_lca(node.right(), value1, value2);
            match (left, right) {
                (Some(_), Some(_)) => Some(node.value),
                (left, right) => left.or(right),
            }
        }

        if !contains(self.root(), value1) || !contains(self.root(), value2) {
            return None;
        }

        find_lca(self.root(), value1, value2)
    }
}

impl<T: fmt::Display> SimpleBinaryTree<T> {
    pub fn serialize(&self) -> String {
        fn serialize<T: fmt::Display>(node: Option<&SimpleNode<T>>) -> String {
            match node {
                Some(node) => format!("{},{},{},", node.value, serialize(node.left()), serialize(node.right())),
                None => String::new(),
            }
        }

        serialize(self.root())
    }
}

impl<T: FromStr> SimpleBinaryTree<T> {
    /// Returns `None` for any malformed input
    pub fn deserialize(text: &str) -> Option<Self> {
        fn deserialize<'a, T: FromStr>(tokens: &mut impl Iterator<Item=&'a str>) -> Option<Option<SimpleNode<T>>> {
            let token = tokens.next()?;
            if token.is_empty() {
                return Some(None);
            }

            let value = token.parse().ok()?;
            let left = deserialize(tokens)?;
            let right = deserialize(tokens)?;
            // Terminator
            if !tokens.next()?.is_empty() {
                return None;
            }

            Some(Some(SimpleNode::new(value, left, right)))
        }

        let mut tokens = text.split(',');
        let root = deserialize(&mut tokens)?;
        match tokens.next() {
            Some(_) => None,
            None => Some(Self::from(root)),
        }
    }
}
