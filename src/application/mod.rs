//! Application layer: endpoint services
//!
//! This layer turns command arguments into API calls through the RPC client.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, CommandResult};
pub use error_ext::IoResultExt;
