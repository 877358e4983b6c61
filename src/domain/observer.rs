//! Change notification contract between the tree and whatever displays it.

use std::fmt;

use super::view::TreeView;

/// Which top-level call produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Delete,
    Clear,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Sent once after every top-level mutating call, including no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent<K> {
    pub op: Operation,
    /// The key passed to the call; `None` for [`Operation::Clear`].
    pub value: Option<K>,
    /// `false` when the call left the tree as it was.
    pub changed: bool,
}

impl<K> ChangeEvent<K> {
    pub fn new(op: Operation, value: Option<K>, changed: bool) -> Self {
        Self { op, value, changed }
    }
}

/// Receives the current root after each mutation.
pub trait TreeObserver<K> {
    fn on_change(&mut self, event: &ChangeEvent<K>, root: TreeView<'_, K>);
}

impl<K, F> TreeObserver<K> for F
where
    F: FnMut(&ChangeEvent<K>, TreeView<'_, K>),
{
    fn on_change(&mut self, event: &ChangeEvent<K>, root: TreeView<'_, K>) {
        self(event, root)
    }
}
