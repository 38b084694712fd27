//! Domain and DNS record endpoints

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use super::path_id;
use crate::application::ApplicationResult;
use crate::domain::{Domain, NoPayload, Record};
use crate::infrastructure::ApiClient;

#[derive(Debug, Deserialize)]
struct DomainsPayload {
    domains: Option<Vec<Domain>>,
}

#[derive(Debug, Deserialize)]
struct DomainPayload {
    domain: Domain,
}

#[derive(Debug, Deserialize)]
struct RecordsPayload {
    records: Option<Vec<Record>>,
}

#[derive(Debug, Deserialize)]
struct RecordPayload {
    record: Record,
}

/// Service for domains and their records.
#[derive(Debug)]
pub struct DomainService {
    client: Arc<ApiClient>,
}

impl DomainService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ApplicationResult<Vec<Domain>> {
        let payload: DomainsPayload = self.client.get("/domains/")?;
        Ok(payload.domains.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, id: &str) -> ApplicationResult<Domain> {
        let id = path_id(id, "domain id")?;
        let payload: DomainPayload = self.client.get(&format!("/domains/{id}"))?;
        Ok(payload.domain)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn destroy(&self, id: &str) -> ApplicationResult<()> {
        let id = path_id(id, "domain id")?;
        self.client
            .get::<NoPayload>(&format!("/domains/{id}/destroy/"))?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn records(&self, domain_id: &str) -> ApplicationResult<Vec<Record>> {
        let domain_id = path_id(domain_id, "domain id")?;
        let payload: RecordsPayload = self
            .client
            .get(&format!("/domains/{domain_id}/records/"))?;
        Ok(payload.records.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn record(&self, domain_id: &str, record_id: &str) -> ApplicationResult<Record> {
        let domain_id = path_id(domain_id, "domain id")?;
        let record_id = path_id(record_id, "record id")?;
        let payload: RecordPayload = self
            .client
            .get(&format!("/domains/{domain_id}/records/{record_id}/"))?;
        Ok(payload.record)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn destroy_record(&self, domain_id: &str, record_id: &str) -> ApplicationResult<()> {
        let domain_id = path_id(domain_id, "domain id")?;
        let record_id = path_id(record_id, "record id")?;
        self.client
            .get::<NoPayload>(&format!("/domains/{domain_id}/records/{record_id}/destroy"))?;
        Ok(())
    }
}
