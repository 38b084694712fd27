//! RPC client: the single call primitive every endpoint goes through
//!
//! A call is a GET to `base_url + path` with all parameters, credentials included, in
//! the query string. The response is a JSON envelope whose `status` field decides
//! success, independent of the HTTP status code.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::domain::{Credentials, Envelope, RawEnvelope, Status};
use crate::infrastructure::traits::HttpTransport;
use crate::infrastructure::{InfraError, InfraResult};

pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com";
pub const CLIENT_ID_PARAM: &str = "client_id";
pub const API_KEY_PARAM: &str = "api_key";

/// Query parameters of a call. Sorted, so encoded URLs are deterministic.
pub type Query = BTreeMap<String, String>;

/// Client bound to one API endpoint and one set of credentials.
pub struct ApiClient {
    base_url: String,
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            transport,
        }
    }

    /// Build the request URL. Credentials overwrite caller parameters of the same name.
    pub fn request_url(&self, path: &str, mut query: Query) -> InfraResult<Url> {
        query.insert(
            CLIENT_ID_PARAM.to_string(),
            self.credentials.client_id.clone(),
        );
        query.insert(API_KEY_PARAM.to_string(), self.credentials.api_key.clone());

        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|e| InfraError::Transport {
            path: path.to_string(),
            source: Box::new(e),
        })?;
        url.query_pairs_mut().clear().extend_pairs(query.iter());
        Ok(url)
    }

    /// Perform a call and decode the envelope.
    ///
    /// # Errors
    /// - [`InfraError::Transport`] when the URL is malformed or the request fails
    /// - [`InfraError::Decode`] when the body is not a matching JSON envelope
    /// - [`InfraError::Api`] when the embedded status is anything but exactly `OK`
    #[instrument(level = "debug", skip(self, query))]
    pub fn call<T: DeserializeOwned>(&self, path: &str, query: Query) -> InfraResult<Envelope<T>> {
        let url = self.request_url(path, query)?;
        debug!("GET {}{}", self.base_url, path);

        let body = self
            .transport
            .get(&url)
            .map_err(|source| InfraError::Transport {
                path: path.to_string(),
                source,
            })?;

        let decode = |source| InfraError::Decode {
            path: path.to_string(),
            source,
        };
        let raw: RawEnvelope = serde_json::from_str(&body).map_err(decode)?;
        if !raw.is_ok() {
            warn!(status = %raw.status(), message = %raw.message(), "API call rejected");
            return Err(InfraError::Api {
                status: raw.status().to_string(),
                message: raw.message().to_string(),
            });
        }
        raw.into_envelope().map_err(decode)
    }

    /// Call without extra parameters and keep only the payload.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> InfraResult<T> {
        self.call(path, Query::new()).map(|envelope| envelope.payload)
    }

    /// Call with parameters and keep only the payload.
    pub fn get_with<T: DeserializeOwned>(&self, path: &str, query: Query) -> InfraResult<T> {
        self.call(path, query).map(|envelope| envelope.payload)
    }
}
