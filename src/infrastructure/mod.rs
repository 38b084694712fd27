//! Infrastructure layer: HTTP transport, RPC client, I/O adapters and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod client;
pub mod di;
pub mod error;
pub mod traits;

pub use client::{ApiClient, Query, API_KEY_PARAM, CLIENT_ID_PARAM, DEFAULT_BASE_URL};
pub use error::{InfraError, InfraResult};
