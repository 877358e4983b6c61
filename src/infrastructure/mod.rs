//! Infrastructure layer: rendering observers and service wiring
//!
//! This layer owns all terminal I/O and connects settings to sessions.

pub mod di;
pub mod error;
pub mod render;

pub use di::ServiceContainer;
pub use error::{InfraError, InfraResult};
pub use render::{ChangeRenderer, ToTermTree, TracingObserver};
