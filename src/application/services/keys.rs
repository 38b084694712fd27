//! SSH key endpoints

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use super::path_id;
use crate::application::ApplicationResult;
use crate::domain::{Key, NoPayload};
use crate::infrastructure::{ApiClient, Query};

#[derive(Debug, Deserialize)]
struct KeysPayload {
    ssh_keys: Option<Vec<Key>>,
}

#[derive(Debug, Deserialize)]
struct KeyPayload {
    ssh_key: Key,
}

/// Service for ssh keys registered with the account.
#[derive(Debug)]
pub struct KeyService {
    client: Arc<ApiClient>,
}

impl KeyService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ApplicationResult<Vec<Key>> {
        let payload: KeysPayload = self.client.get("/ssh_keys/")?;
        Ok(payload.ssh_keys.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, id: &str) -> ApplicationResult<Key> {
        let id = path_id(id, "key id")?;
        let payload: KeyPayload = self.client.get(&format!("/ssh_keys/{id}"))?;
        Ok(payload.ssh_key)
    }

    #[instrument(level = "debug", skip(self, public_key))]
    pub fn add(&self, name: &str, public_key: &str) -> ApplicationResult<Key> {
        let query = Query::from([
            ("name".to_string(), name.to_string()),
            ("ssh_pub_key".to_string(), public_key.to_string()),
        ]);
        let payload: KeyPayload = self.client.get_with("/ssh_keys/new/", query)?;
        Ok(payload.ssh_key)
    }

    #[instrument(level = "debug", skip(self, public_key))]
    pub fn update(&self, id: &str, public_key: &str) -> ApplicationResult<Key> {
        let id = path_id(id, "key id")?;
        let query = Query::from([("ssh_pub_key".to_string(), public_key.to_string())]);
        let payload: KeyPayload = self
            .client
            .get_with(&format!("/ssh_keys/{id}/edit/"), query)?;
        Ok(payload.ssh_key)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn destroy(&self, id: &str) -> ApplicationResult<()> {
        let id = path_id(id, "key id")?;
        self.client
            .get::<NoPayload>(&format!("/ssh_keys/{id}/destroy/"))?;
        Ok(())
    }
}
