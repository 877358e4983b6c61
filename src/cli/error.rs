//! CLI-level errors (wraps infrastructure errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("no such script: {}", .0.display())]
    NoInput(PathBuf),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoInput(_) => crate::exitcode::NOINPUT,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(ApplicationError::Config { .. }) => crate::exitcode::CONFIG,
                InfraError::Application(app) if app.is_input_error() => crate::exitcode::DATAERR,
                InfraError::Application(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_error_kinds_when_exit_code_then_sysexits_mapping() {
        let bad_value = ApplicationError::InvalidValue {
            raw: "x".into(),
            reason: "nope".into(),
        };
        assert_eq!(
            CliError::from(bad_value.at_line(3)).exit_code(),
            crate::exitcode::DATAERR
        );

        let broken = ApplicationError::Domain(DomainError::LengthMismatch {
            recorded: 1,
            reachable: 0,
        });
        assert_eq!(CliError::from(broken).exit_code(), crate::exitcode::SOFTWARE);

        let config = ApplicationError::Config {
            message: "bad".into(),
        };
        assert_eq!(CliError::from(config).exit_code(), crate::exitcode::CONFIG);

        let io = InfraError::io("read script", std::io::Error::other("gone"));
        assert_eq!(CliError::from(io).exit_code(), crate::exitcode::IOERR);

        assert_eq!(
            CliError::NoInput(PathBuf::from("missing.avl")).exit_code(),
            crate::exitcode::NOINPUT
        );
    }
}
