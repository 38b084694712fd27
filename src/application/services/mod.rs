//! Application services
//!
//! One service per API resource. Each wraps the shared RPC client and turns
//! call arguments into a path and query parameters.

mod catalog;
mod domains;
mod droplets;
mod images;
mod keys;

pub use catalog::CatalogService;
pub use domains::DomainService;
pub use droplets::DropletService;
pub use images::ImageService;
pub use keys::KeyService;

use serde::Deserialize;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::EventId;

/// Check that a user supplied id can be placed in a URL path as one segment.
pub(crate) fn path_id<'a>(value: &'a str, what: &str) -> ApplicationResult<&'a str> {
    if value.is_empty() || value.contains(['/', '?', '#']) {
        return Err(ApplicationError::invalid_input(format!(
            "invalid {what}: '{value}'"
        )));
    }
    Ok(value)
}

/// Payload of every endpoint that starts an asynchronous event.
#[derive(Debug, Deserialize)]
pub(crate) struct EventIdPayload {
    pub event_id: EventId,
}
