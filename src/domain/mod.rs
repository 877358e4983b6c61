//! Domain layer: the balanced tree and its read-only views
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod iter;
pub mod node;
pub mod observer;
pub mod tree;
pub mod view;

pub use error::DomainError;
pub use iter::{InOrder, LevelOrder, PreOrder};
pub use node::{Link, Node};
pub use observer::{ChangeEvent, Operation, TreeObserver};
pub use tree::AvlTree;
pub use view::TreeView;
