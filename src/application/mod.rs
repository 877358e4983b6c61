//! Application layer: input parsing and the editing session
//!
//! This layer turns raw text into validated commands and drives the domain tree.

pub mod command;
pub mod error;
pub mod session;

pub use command::{parse_line, parse_value, Command, HELP};
pub use error::{ApplicationError, ApplicationResult};
pub use session::{Change, Outcome, Session, Stats};
