//! Height-balanced (AVL) binary search tree with change notification.
//!
//! The [`domain`] layer holds the tree itself and knows nothing about how it is
//! shown. Observers registered on an [`AvlTree`] receive a read-only
//! [`TreeView`] after every `insert`, `delete` and `clear`; the
//! [`infrastructure::render`] module provides terminal renderers built on that
//! contract.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree: AvlTree<i64> = [10, 20, 30].into_iter().collect();
//! assert_eq!(tree.root_value(), Some(&20));
//! assert!(tree.delete(&10));
//! assert!(!tree.insert(20));
//! assert_eq!(tree.to_vec(), vec![20, 30]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{AvlTree, ChangeEvent, DomainError, Node, Operation, TreeObserver, TreeView};
