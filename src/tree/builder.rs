use super::Node;

type Subtree<T> = Option<Box<Node<T>>>;

/// A node whose value is known but whose subtrees are still being built
struct Frame<T> {
    value: T,
    /// `None` until the left subtree is complete
    left: Option<Subtree<T>>,
}

/// Rebuilds a tree from the pre-order sequence of its child slots
///
/// Each call to `push` supplies the next slot: `Some(value)` for a node, `None` for an absent
/// subtree. Nodes are assembled bottom-up on an explicit stack, so the depth of the tree being
/// built does not affect the call stack.
pub(crate) struct PreorderBuilder<T> {
    stack: Vec<Frame<T>>,
    /// `Some` once the root subtree is complete
    root: Option<Subtree<T>>,
    /// Total number of nodes pushed so far
    nodes: usize,
}

impl<T> PreorderBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            nodes: 0,
        }
    }

    /// Returns true once the slots pushed so far describe one complete tree
    pub(crate) fn is_complete(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the number of nodes pushed so far
    pub(crate) fn node_count(&self) -> usize {
        self.nodes
    }

    /// Supplies the next slot in pre-order
    ///
    /// Returns the number of nodes that this slot completed. Pushing an absent subtree completes
    /// every pending node whose right subtree it finishes, innermost first.
    ///
    /// Must not be called once the tree is complete.
    pub(crate) fn push(&mut self, slot: Option<T>) -> usize {
        debug_assert!(!self.is_complete(), "bug: slot pushed after the tree was complete");

        if let Some(value) = slot {
            self.nodes += 1;
            self.stack.push(Frame {value, left: None});
            return 0;
        }

        let mut subtree: Subtree<T> = None;
        let mut completed = 0;
        loop {
            let mut frame = match self.stack.pop() {
                Some(frame) => frame,
                None => {
                    self.root = Some(subtree);
                    return completed;
                },
            };

            match frame.left.take() {
                // Left subtree just finished, the right one comes next
                None => {
                    frame.left = Some(subtree);
                    self.stack.push(frame);
                    return completed;
                },

                Some(left) => {
                    let node = Node::from_boxed_children(frame.value, left, subtree);
                    subtree = Some(Box::new(node));
                    completed += 1;
                },
            }
        }
    }

    /// Returns the finished tree, or `None` if the slots pushed so far are incomplete
    pub(crate) fn finish(self) -> Option<Subtree<T>> {
        self.root
    }
}
