//! Infrastructure-level errors: transport, wire decoding and external processes

use thiserror::Error;

use crate::infrastructure::traits::TransportError;

/// Infrastructure errors cover everything that happens outside the process:
/// the network call, the response body, and spawned programs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("cannot decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call went through but the embedded status was not `OK`.
    #[error("{status}: {message}")]
    Api { status: String, message: String },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed: {message}")]
    Command {
        message: String,
        exit_code: Option<i32>,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
