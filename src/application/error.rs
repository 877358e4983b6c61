//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add boundary-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid value '{raw}': {reason}")]
    InvalidValue { raw: String, reason: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument for '{0}'")]
    MissingArgument(String),

    #[error("unexpected argument for '{command}': {extra}")]
    UnexpectedArgument { command: String, extra: String },

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<ApplicationError>,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Attach a 1-based script line number.
    pub fn at_line(self, line: usize) -> Self {
        Self::Script {
            line,
            source: Box::new(self),
        }
    }

    /// True for errors caused by malformed user input.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InvalidValue { .. }
            | Self::UnknownCommand(_)
            | Self::MissingArgument(_)
            | Self::UnexpectedArgument { .. } => true,
            Self::Script { source, .. } => source.is_input_error(),
            Self::Domain(_) | Self::Config { .. } => false,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
