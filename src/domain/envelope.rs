//! Generic response envelope shared by every API endpoint
//!
//! Every response is a JSON object carrying `status`, `message` and an
//! endpoint-specific payload in the remaining top-level fields. Decoding is two-step:
//! the envelope is read first, and the payload only once the status says `OK`, so error
//! responses never need a payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The only status value that marks success.
pub const STATUS_OK: &str = "OK";

/// Status accessor shared by raw and typed envelopes.
pub trait Status {
    fn status(&self) -> &str;
    fn message(&self) -> &str;

    /// Exact, case-sensitive comparison against [`STATUS_OK`].
    fn is_ok(&self) -> bool {
        self.status() == STATUS_OK
    }
}

/// Envelope with the payload still undecoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RawEnvelope {
    /// Decode the remaining fields into the endpoint's payload type.
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<Envelope<T>, serde_json::Error> {
        let payload = serde_json::from_value(Value::Object(self.payload))?;
        Ok(Envelope {
            status: self.status,
            message: self.message.unwrap_or_default(),
            payload,
        })
    }
}

impl Status for RawEnvelope {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Fully decoded response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: String,
    pub message: String,
    pub payload: T,
}

impl<T> Status for Envelope<T> {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Payload of endpoints that only report a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoPayload {}
