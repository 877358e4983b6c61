//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural defects found by [`AvlTree::validate`](crate::domain::AvlTree::validate).
///
/// The tree never produces these on its own; seeing one means the balancing code
/// is broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("order violated at {value}: outside ({lower}, {upper})")]
    OrderViolation {
        value: String,
        lower: String,
        upper: String,
    },

    #[error("unbalanced node {value}: balance factor {balance}")]
    Unbalanced { value: String, balance: isize },

    #[error("stale height at {value}: cached {cached}, actual {actual}")]
    HeightMismatch {
        value: String,
        cached: usize,
        actual: usize,
    },

    #[error("length mismatch: recorded {recorded}, reachable {reachable}")]
    LengthMismatch { recorded: usize, reachable: usize },
}
