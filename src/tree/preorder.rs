use std::iter::FusedIterator;

use super::Node;

/// Pre-order traversal over the nodes of a tree
pub(crate) struct IterPreorder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> IterPreorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, T> Iterator for IterPreorder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

impl<'a, T> FusedIterator for IterPreorder<'a, T> {}

/// A step of a pre-order walk that also reports absent subtrees and the end of each node
#[derive(Debug)]
pub(crate) enum Event<'a, T> {
    /// A node, reported before either of its subtrees
    Enter(&'a Node<T>),
    /// An absent subtree
    Empty,
    /// Reported once both subtrees of the most recently entered, unfinished node are done
    Leave,
}

enum Step<'a, T> {
    Visit(Option<&'a Node<T>>),
    Leave,
}

/// Pre-order walk over every child slot of a tree, present or not
///
/// An empty tree produces a single `Event::Empty`. Every `Event::Enter` is balanced by exactly one
/// later `Event::Leave`.
pub(crate) struct IterEvents<'a, T> {
    stack: Vec<Step<'a, T>>,
}

impl<'a, T> IterEvents<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: vec![Step::Visit(root)],
        }
    }
}

impl<'a, T> Iterator for IterEvents<'a, T> {
    type Item = Event<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            Step::Visit(Some(node)) => {
                self.stack.push(Step::Leave);
                self.stack.push(Step::Visit(node.right()));
                self.stack.push(Step::Visit(node.left()));
                Some(Event::Enter(node))
            },
            Step::Visit(None) => Some(Event::Empty),
            Step::Leave => Some(Event::Leave),
        }
    }
}

impl<'a, T> FusedIterator for IterEvents<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(root: Option<&Node<i32>>) -> Vec<String> {
        IterEvents::new(root).map(|event| match event {
            Event::Enter(node) => node.value().to_string(),
            Event::Empty => "_".to_string(),
            Event::Leave => "^".to_string(),
        }).collect()
    }

    #[test]
    fn preorder_nodes() {
        //      4
        //   2     5
        // 1   3
        let root = Node::with_children(
            4,
            Some(Node::with_children(2, Some(Node::new(1)), Some(Node::new(3)))),
            Some(Node::new(5)),
        );

        let values: Vec<_> = IterPreorder::new(Some(&root)).map(|node| *node.value()).collect();
        assert_eq!(&values, &[4, 2, 1, 3, 5]);

        assert_eq!(IterPreorder::<i32>::new(None).count(), 0);
    }

    #[test]
    fn events() {
        assert_eq!(describe(None), ["_"]);
        assert_eq!(describe(Some(&Node::new(2))), ["2", "_", "_", "^"]);

        let root = Node::with_children(1, Some(Node::new(2)), None);
        assert_eq!(describe(Some(&root)), ["1", "2", "_", "_", "^", "_", "^"]);
    }
}
