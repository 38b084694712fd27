//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the command tree's shape.
/// They surface while commands are registered, never while dispatching.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("command name must not be empty (under '{parent}')")]
    EmptyCommandName { parent: String },

    #[error("command '{name}' is already registered under '{parent}'")]
    DuplicateCommand { parent: String, name: String },

    #[error("'{0}' is a command and cannot have subcommands")]
    NotAGroup(String),

    #[error("unknown command node: {0:?}")]
    UnknownNode(Index),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
