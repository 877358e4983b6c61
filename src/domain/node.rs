//! AVL node storage and the recursive rebalancing algorithms.
//!
//! Every mutating function consumes a subtree and hands back its replacement root,
//! so callers reattach with `node.left = ...` and no parent pointers are needed.

use std::cmp::{max, Ordering};

/// Owned child slot: `None` is an empty subtree of height 0.
pub type Link<K> = Option<Box<Node<K>>>;

/// One key of the tree together with the cached height of its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) value: K,
    pub(crate) height: usize,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// A fresh leaf of height 1.
    pub fn leaf(value: K) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &K {
        &self.value
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    /// `height(left) - height(right)`.
    pub fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }
}

pub fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

pub fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |node| node.balance())
}

/// Lifts the left child of `y` into its place; `y` becomes the right child.
///
/// # Panics
/// If `y` has no left child. Callers only rotate towards a heavy side, so hitting
/// this means the tree is already corrupt.
pub fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut x) = y.left.take() else {
        panic!("rotate_right: pivot has no left child");
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`].
///
/// # Panics
/// If `x` has no right child.
pub fn rotate_left<K>(mut x: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut y) = x.right.take() else {
        panic!("rotate_left: pivot has no right child");
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Inserts `value` below `link` and returns the new subtree root.
///
/// The flag is `false` when the value was already present; the subtree is then
/// returned untouched.
pub fn insert<K: Ord>(link: Link<K>, value: K) -> (Box<Node<K>>, bool) {
    let Some(mut node) = link else {
        return (Box::new(Node::leaf(value)), true);
    };

    // Position of the new key relative to the child on its path. If this node ends up
    // unbalanced the child was not rotated, so its value is the one seen here.
    let (changed, path) = match value.cmp(&node.value) {
        Ordering::Less => {
            let path = node.left.as_ref().map(|child| value.cmp(&child.value));
            let (left, changed) = insert(node.left.take(), value);
            node.left = Some(left);
            (changed, path)
        }
        Ordering::Greater => {
            let path = node.right.as_ref().map(|child| value.cmp(&child.value));
            let (right, changed) = insert(node.right.take(), value);
            node.right = Some(right);
            (changed, path)
        }
        Ordering::Equal => return (node, false),
    };
    if !changed {
        return (node, false);
    }

    node.update_height();
    let balance = node.balance();

    let node = match path {
        Some(Ordering::Less) if balance > 1 => rotate_right(node),
        Some(Ordering::Greater) if balance < -1 => rotate_left(node),
        Some(Ordering::Greater) if balance > 1 => {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        Some(Ordering::Less) if balance < -1 => {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    };
    (node, true)
}

/// Removes `value` below `link` and returns the new subtree root.
///
/// A node with two children takes over its in-order successor's value and the
/// successor node is removed from the right subtree instead.
pub fn delete<K: Ord + Clone>(link: Link<K>, value: &K) -> (Link<K>, bool) {
    let Some(mut node) = link else {
        return (None, false);
    };

    let changed = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, changed) = delete(node.left.take(), value);
            node.left = left;
            changed
        }
        Ordering::Greater => {
            let (right, changed) = delete(node.right.take(), value);
            node.right = right;
            changed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, true),
            (Some(child), None) | (None, Some(child)) => return (Some(child), true),
            (Some(left), Some(right)) => {
                let successor = min_value(&right).clone();
                let (right, _) = delete(Some(right), &successor);
                node.value = successor;
                node.left = Some(left);
                node.right = right;
                true
            }
        },
    };
    if !changed {
        return (Some(node), false);
    }

    (Some(rebalance(node)), true)
}

/// Restores the balance of `node` after one of its subtrees shrank, deciding
/// single versus double rotation from the heavy child's own balance.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

/// Smallest value in the subtree rooted at `node`.
pub fn min_value<K>(node: &Node<K>) -> &K {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    &current.value
}

/// Largest value in the subtree rooted at `node`.
pub fn max_value<K>(node: &Node<K>) -> &K {
    let mut current = node;
    while let Some(right) = current.right.as_deref() {
        current = right;
    }
    &current.value
}
