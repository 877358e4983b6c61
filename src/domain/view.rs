//! Read-only window onto a tree, handed to observers and renderers.

use std::fmt;

use super::iter::{InOrder, LevelOrder, PreOrder};
use super::node::Node;

/// Borrowed view of a (possibly empty) subtree.
///
/// A view only hands out shared references, so nothing reachable from it can be
/// mutated while it is alive.
pub struct TreeView<'a, K> {
    node: Option<&'a Node<K>>,
}

impl<K> Clone for TreeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for TreeView<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for TreeView<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) => f
                .debug_struct("TreeView")
                .field("value", &node.value)
                .field("height", &node.height)
                .finish(),
            None => f.write_str("TreeView(empty)"),
        }
    }
}

impl<'a, K> TreeView<'a, K> {
    pub fn new(node: Option<&'a Node<K>>) -> Self {
        Self { node }
    }

    pub fn empty() -> Self {
        Self { node: None }
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    pub fn value(&self) -> Option<&'a K> {
        self.node.map(Node::value)
    }

    /// Cached height; 0 for an empty view.
    pub fn height(&self) -> usize {
        self.node.map_or(0, Node::height)
    }

    pub fn balance(&self) -> isize {
        self.node.map_or(0, Node::balance)
    }

    pub fn left(&self) -> TreeView<'a, K> {
        TreeView::new(self.node.and_then(Node::left))
    }

    pub fn right(&self) -> TreeView<'a, K> {
        TreeView::new(self.node.and_then(Node::right))
    }

    pub fn is_leaf(&self) -> bool {
        self.node
            .is_some_and(|node| node.left.is_none() && node.right.is_none())
    }

    /// Number of reachable nodes, counted by walking the subtree.
    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    pub fn in_order(&self) -> InOrder<'a, K> {
        InOrder::new(self.node)
    }

    pub fn pre_order(&self) -> PreOrder<'a, K> {
        PreOrder::new(self.node)
    }

    pub fn level_order(&self) -> LevelOrder<'a, K> {
        LevelOrder::new(self.node)
    }
}
