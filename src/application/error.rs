//! Application-level errors (wraps domain and infrastructure errors)

use thiserror::Error;

use crate::domain::{DomainError, HandlerError, HandlerResult};
use crate::infrastructure::InfraError;

/// Application errors wrap lower layers and add command-level failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}: not implemented")]
    Unimplemented(String),

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApplicationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Result type of command handlers.
pub type CommandResult = HandlerResult<ApplicationError>;

impl From<ApplicationError> for HandlerError<ApplicationError> {
    fn from(e: ApplicationError) -> Self {
        HandlerError::Failed(e)
    }
}

impl From<InfraError> for HandlerError<ApplicationError> {
    fn from(e: InfraError) -> Self {
        HandlerError::Failed(e.into())
    }
}

impl From<std::io::Error> for HandlerError<ApplicationError> {
    fn from(e: std::io::Error) -> Self {
        HandlerError::Failed(e.into())
    }
}
