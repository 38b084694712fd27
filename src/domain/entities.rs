//! Domain entities: API resources and credentials
//!
//! Resources mirror the wire format 1:1 and carry no behavior.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client id and API key sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image_id: u64,
    #[serde(default)]
    pub size_id: u64,
    #[serde(default)]
    pub region_id: u64,
    #[serde(default)]
    pub backups_active: bool,
    pub ip_address: Option<String>,
    pub private_ip_address: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Receipt returned when a droplet is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropletCreation {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image_id: u64,
    #[serde(default)]
    pub size_id: u64,
    pub event_id: EventId,
}

/// Parameters for creating a droplet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDroplet {
    pub name: String,
    pub size_id: String,
    pub image_id: String,
    pub region_id: String,
    /// Comma separated list of ssh key ids
    pub ssh_key_ids: String,
}

/// A DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    pub name: String,
    pub ttl: Option<u64>,
    pub live_zone_file: Option<String>,
    pub error: Option<String>,
    pub zone_file_with_error: Option<String>,
}

/// A DNS record inside a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub domain_id: u64,
    pub record_type: String,
    pub name: Option<String>,
    pub data: String,
    pub priority: Option<i64>,
    pub port: Option<String>,
    pub weight: Option<String>,
}

/// A registered ssh public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub id: u64,
    pub name: String,
    #[serde(rename = "ssh_pub_key", default)]
    pub public_key: Option<String>,
}

/// A distribution image or snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub name: String,
    pub distribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: u64,
    pub name: String,
}

/// Id of an asynchronous event started by a droplet or image action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of an asynchronous event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(rename = "action_status")]
    pub status: Option<String>,
    pub droplet_id: Option<u64>,
    #[serde(rename = "event_type_id")]
    pub event_type: Option<u64>,
    pub percentage: Option<String>,
}
