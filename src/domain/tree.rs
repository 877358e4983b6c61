//! The owning tree handle: root, size bookkeeping and observer fan-out.

use std::fmt;

use tracing::{debug, instrument};

use super::error::DomainError;
use super::iter::InOrder;
use super::node::{self, Link, Node};
use super::observer::{ChangeEvent, Operation, TreeObserver};
use super::view::TreeView;

/// Height-balanced binary search tree of unique keys.
///
/// Every call to [`insert`](Self::insert), [`delete`](Self::delete) and
/// [`clear`](Self::clear) notifies each subscribed observer exactly once after the
/// tree has settled.
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
    observers: Vec<Box<dyn TreeObserver<K>>>,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("root", &self.root)
            .field("len", &self.len)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<K> AvlTree<K> {
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            observers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root; 0 when empty.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    pub fn root_value(&self) -> Option<&K> {
        self.root.as_deref().map(Node::value)
    }

    pub fn view(&self) -> TreeView<'_, K> {
        TreeView::new(self.root.as_deref())
    }

    /// Values in ascending order.
    pub fn iter(&self) -> InOrder<'_, K> {
        self.view().in_order()
    }

    pub fn min(&self) -> Option<&K> {
        self.root.as_deref().map(node::min_value)
    }

    pub fn max(&self) -> Option<&K> {
        self.root.as_deref().map(node::max_value)
    }

    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver<K>>) {
        self.observers.push(observer);
    }

    /// Closure form of [`subscribe`](Self::subscribe).
    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(&ChangeEvent<K>, TreeView<'_, K>) + 'static,
        K: 'static,
    {
        self.observers.push(Box::new(f));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, event: ChangeEvent<K>) {
        let view = TreeView::new(self.root.as_deref());
        for observer in self.observers.iter_mut() {
            observer.on_change(&event, view);
        }
    }
}

impl<K: Ord + Clone + fmt::Debug> AvlTree<K> {
    /// Inserts `value`; returns `false` if it was already present.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: K) -> bool {
        let event_value = value.clone();
        let (root, changed) = node::insert(self.root.take(), value);
        self.root = Some(root);
        if changed {
            self.len += 1;
        }
        debug!(changed, len = self.len, height = self.height(), "insert done");
        self.notify(ChangeEvent::new(Operation::Insert, Some(event_value), changed));
        changed
    }

    /// Removes `value`; returns `false` if it was not present.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: &K) -> bool {
        let (root, changed) = node::delete(self.root.take(), value);
        self.root = root;
        if changed {
            self.len -= 1;
        }
        debug!(changed, len = self.len, height = self.height(), "delete done");
        self.notify(ChangeEvent::new(Operation::Delete, Some(value.clone()), changed));
        changed
    }

    /// Drops every node.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        let changed = self.root.take().is_some();
        self.len = 0;
        self.notify(ChangeEvent::new(Operation::Clear, None, changed));
    }

    pub fn contains(&self, value: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.value()) {
                std::cmp::Ordering::Less => node.left(),
                std::cmp::Ordering::Greater => node.right(),
                std::cmp::Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn to_vec(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }

    /// Walks the whole tree and reports the first broken invariant.
    ///
    /// Checks strict BST order, `|balance| <= 1`, cached heights and the recorded
    /// length. Nothing is repaired.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Result<(), DomainError> {
        let (reachable, _) = check_subtree(self.root.as_deref(), None, None)?;
        if reachable != self.len {
            return Err(DomainError::LengthMismatch {
                recorded: self.len,
                reachable,
            });
        }
        Ok(())
    }
}

/// Returns `(node count, actual height)` of the subtree.
fn check_subtree<K: Ord + fmt::Debug>(
    node: Option<&Node<K>>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<(usize, usize), DomainError> {
    let Some(node) = node else {
        return Ok((0, 0));
    };
    let value = node.value();

    let above_lower = lower.map_or(true, |lo| value > lo);
    let below_upper = upper.map_or(true, |hi| value < hi);
    if !above_lower || !below_upper {
        return Err(DomainError::OrderViolation {
            value: format!("{value:?}"),
            lower: lower.map_or_else(|| "-inf".to_string(), |lo| format!("{lo:?}")),
            upper: upper.map_or_else(|| "+inf".to_string(), |hi| format!("{hi:?}")),
        });
    }

    let (left_count, left_height) = check_subtree(node.left(), lower, Some(value))?;
    let (right_count, right_height) = check_subtree(node.right(), Some(value), upper)?;

    let actual = 1 + left_height.max(right_height);
    if node.height() != actual {
        return Err(DomainError::HeightMismatch {
            value: format!("{value:?}"),
            cached: node.height(),
            actual,
        });
    }

    let balance = left_height as isize - right_height as isize;
    if balance.abs() > 1 {
        return Err(DomainError::Unbalanced {
            value: format!("{value:?}"),
            balance,
        });
    }

    Ok((1 + left_count + right_count, actual))
}

impl<K: Ord + Clone + fmt::Debug> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K: Ord + Clone + fmt::Debug> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
