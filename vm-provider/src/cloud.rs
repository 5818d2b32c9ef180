//! The slice of the cloud API the instance managers depend on.
//!
//! Clients are injected already authenticated; nothing here knows how to
//! talk to a particular cloud.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One address attached to a server on a given network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub addr: String,
    pub version: u8,
}

impl AddressEntry {
    pub fn v4(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            version: 4,
        }
    }

    pub fn v6(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            version: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Addresses keyed by network label, in the order the provider lists them.
    #[serde(default)]
    pub addresses: IndexMap<String, Vec<AddressEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub ip: String,
    /// Server the address is associated with, if any.
    #[serde(default)]
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub id: String,
    /// Size in GiB, the provider's reporting unit.
    pub size_gib: u64,
}

#[async_trait]
pub trait CloudClient: Send + Sync {
    async fn get_server(&self, cid: &str) -> Result<ServerInfo>;

    /// Floating IPs visible to the tenant, in provider order.
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>>;

    async fn get_volume(&self, cid: &str) -> Result<VolumeInfo>;
}
