//! Image endpoints

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use super::{path_id, EventIdPayload};
use crate::application::ApplicationResult;
use crate::domain::{EventId, Image, NoPayload};
use crate::infrastructure::{ApiClient, Query};

#[derive(Debug, Deserialize)]
struct ImagesPayload {
    images: Option<Vec<Image>>,
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    image: Image,
}

/// Service for distribution images and snapshots.
#[derive(Debug)]
pub struct ImageService {
    client: Arc<ApiClient>,
}

impl ImageService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ApplicationResult<Vec<Image>> {
        let payload: ImagesPayload = self.client.get("/images/")?;
        Ok(payload.images.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, id: &str) -> ApplicationResult<Image> {
        let id = path_id(id, "image id")?;
        let payload: ImagePayload = self.client.get(&format!("/images/{id}/"))?;
        Ok(payload.image)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn transfer(&self, id: &str, region_id: &str) -> ApplicationResult<EventId> {
        let id = path_id(id, "image id")?;
        let query = Query::from([("region_id".to_string(), region_id.to_string())]);
        let payload: EventIdPayload = self
            .client
            .get_with(&format!("/images/{id}/transfer/"), query)?;
        Ok(payload.event_id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn destroy(&self, id: &str) -> ApplicationResult<()> {
        let id = path_id(id, "image id")?;
        self.client.get::<NoPayload>(&format!("/images/{id}/destroy/"))?;
        Ok(())
    }
}
