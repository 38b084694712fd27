//! Regions, sizes and event status

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use super::path_id;
use crate::application::ApplicationResult;
use crate::domain::{Event, Region, Size};
use crate::infrastructure::ApiClient;

#[derive(Debug, Deserialize)]
struct RegionsPayload {
    regions: Option<Vec<Region>>,
}

#[derive(Debug, Deserialize)]
struct SizesPayload {
    sizes: Option<Vec<Size>>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    event: Event,
}

/// Read-only lookups that are not tied to one resource.
#[derive(Debug)]
pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn regions(&self) -> ApplicationResult<Vec<Region>> {
        let payload: RegionsPayload = self.client.get("/regions/")?;
        Ok(payload.regions.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn sizes(&self) -> ApplicationResult<Vec<Size>> {
        let payload: SizesPayload = self.client.get("/sizes/")?;
        Ok(payload.sizes.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn event(&self, id: &str) -> ApplicationResult<Event> {
        let id = path_id(id, "event id")?;
        let payload: EventPayload = self.client.get(&format!("/events/{id}/"))?;
        Ok(payload.event)
    }
}
