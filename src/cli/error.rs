//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl From<InfraError> for CliError {
    fn from(e: InfraError) -> Self {
        CliError::Application(e.into())
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::InvalidInput { .. } => exitcode::USAGE,
                ApplicationError::Io(_) | ApplicationError::OperationFailed { .. } => {
                    exitcode::IOERR
                }
                ApplicationError::Domain(_) | ApplicationError::Unimplemented(_) => {
                    exitcode::SOFTWARE
                }
                ApplicationError::Infra(infra) => match infra {
                    InfraError::Transport { .. } => exitcode::UNAVAILABLE,
                    InfraError::Decode { .. } => exitcode::DATAERR,
                    InfraError::Api { .. } => exitcode::SOFTWARE,
                    InfraError::Io { .. } => exitcode::IOERR,
                    InfraError::Command { .. } => exitcode::SOFTWARE,
                },
            },
        }
    }
}
