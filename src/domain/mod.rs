//! Domain layer: command tree, wire envelope and API resources
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod entities;
pub mod envelope;
pub mod error;

pub use command::{
    CommandNode, CommandTree, Handler, HandlerError, HandlerResult, NodeId, NodeKind, Outcome,
};
pub use entities::*;
pub use envelope::{Envelope, NoPayload, RawEnvelope, Status, STATUS_OK};
pub use error::{DomainError, DomainResult};
