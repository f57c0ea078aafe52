use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A trigger condition offered by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    pub description: String,
}

/// An effect a service can perform when an action fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionDescriptor {
    pub name: String,
    pub description: String,
}

/// One integrated external system and what it can trigger and perform.
///
/// Action and reaction lists keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub name: String,
    pub actions: Vec<ActionDescriptor>,
    pub reactions: Vec<ReactionDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Seconds since the Unix epoch.
    pub current_time: i64,
    pub services: Vec<ServiceCatalogEntry>,
}

/// The `about.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutResponse {
    pub client: ClientInfo,
    pub server: ServerInfo,
}

impl AboutResponse {
    /// Assembles a document for `host` at `current_time` with a freshly built catalog.
    pub fn new(host: impl Into<String>, current_time: i64) -> Self {
        Self {
            client: ClientInfo { host: host.into() },
            server: ServerInfo {
                current_time,
                services: crate::services(),
            },
        }
    }

    /// Assembles a document stamped with the current UTC time.
    pub fn now(host: impl Into<String>) -> Self {
        Self::new(host, Utc::now().timestamp())
    }
}
