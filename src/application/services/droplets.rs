//! Droplet endpoints

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use super::{path_id, EventIdPayload};
use crate::application::ApplicationResult;
use crate::domain::{Droplet, DropletCreation, EventId, NewDroplet};
use crate::infrastructure::{ApiClient, Query};

#[derive(Debug, Deserialize)]
struct DropletsPayload {
    droplets: Option<Vec<Droplet>>,
}

#[derive(Debug, Deserialize)]
struct DropletPayload {
    droplet: Droplet,
}

#[derive(Debug, Deserialize)]
struct DropletCreationPayload {
    droplet: DropletCreation,
}

/// Service for listing, creating and acting on droplets.
#[derive(Debug)]
pub struct DropletService {
    client: Arc<ApiClient>,
}

impl DropletService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ApplicationResult<Vec<Droplet>> {
        let payload: DropletsPayload = self.client.get("/droplets/")?;
        Ok(payload.droplets.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, id: &str) -> ApplicationResult<Droplet> {
        let id = path_id(id, "droplet id")?;
        let payload: DropletPayload = self.client.get(&format!("/droplets/{id}"))?;
        Ok(payload.droplet)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, request: &NewDroplet) -> ApplicationResult<DropletCreation> {
        let query = Query::from([
            ("name".to_string(), request.name.clone()),
            ("size_id".to_string(), request.size_id.clone()),
            ("image_id".to_string(), request.image_id.clone()),
            ("region_id".to_string(), request.region_id.clone()),
            ("ssh_key_ids".to_string(), request.ssh_key_ids.clone()),
        ]);
        let payload: DropletCreationPayload = self.client.get_with("/droplets/new", query)?;
        Ok(payload.droplet)
    }

    pub fn shutdown(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "shutdown", Query::new())
    }

    pub fn reboot(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "reboot", Query::new())
    }

    pub fn power_off(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "power_off", Query::new())
    }

    pub fn power_on(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "power_on", Query::new())
    }

    pub fn power_cycle(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "power_cycle", Query::new())
    }

    pub fn resize(&self, id: &str, size_id: &str) -> ApplicationResult<EventId> {
        self.action(id, "resize", param("size_id", size_id))
    }

    pub fn snapshot(&self, id: &str, name: &str) -> ApplicationResult<EventId> {
        self.action(id, "snapshot", param("name", name))
    }

    pub fn restore(&self, id: &str, image_id: &str) -> ApplicationResult<EventId> {
        self.action(id, "restore", param("image_id", image_id))
    }

    pub fn rebuild(&self, id: &str, image_id: &str) -> ApplicationResult<EventId> {
        self.action(id, "rebuild", param("image_id", image_id))
    }

    pub fn rename(&self, id: &str, name: &str) -> ApplicationResult<EventId> {
        self.action(id, "rename", param("name", name))
    }

    pub fn reset_password(&self, id: &str) -> ApplicationResult<EventId> {
        self.action(id, "password_reset", Query::new())
    }

    pub fn destroy(&self, id: &str, scrub_data: bool) -> ApplicationResult<EventId> {
        self.action(id, "destroy", param("scrub_data", &scrub_data.to_string()))
    }

    #[instrument(level = "debug", skip(self, query))]
    fn action(&self, id: &str, action: &str, query: Query) -> ApplicationResult<EventId> {
        let id = path_id(id, "droplet id")?;
        let payload: EventIdPayload = self
            .client
            .get_with(&format!("/droplets/{id}/{action}/"), query)?;
        Ok(payload.event_id)
    }
}

fn param(name: &str, value: &str) -> Query {
    Query::from([(name.to_string(), value.to_string())])
}
