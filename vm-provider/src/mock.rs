//! In-memory cloud and tunnel doubles for tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::cloud::{AddressEntry, CloudClient, FloatingIp, ServerInfo, VolumeInfo};
use crate::error::{ProviderError, Result};
use crate::tunnel::{AgentTunnel, TunnelSpec};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MockCloud {
    servers: Mutex<IndexMap<String, ServerInfo>>,
    floating_ips: Mutex<Vec<FloatingIp>>,
    volumes: Mutex<IndexMap<String, VolumeInfo>>,
}

impl MockCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(self, id: &str, networks: &[(&str, Vec<AddressEntry>)]) -> Self {
        let addresses = networks
            .iter()
            .map(|(label, entries)| (label.to_string(), entries.clone()))
            .collect();
        lock(&self.servers).insert(
            id.to_string(),
            ServerInfo {
                id: id.to_string(),
                name: None,
                addresses,
            },
        );
        self
    }

    pub fn with_floating_ips(self, floating_ips: Vec<FloatingIp>) -> Self {
        self.set_floating_ips(floating_ips);
        self
    }

    pub fn with_volume(self, id: &str, size_gib: u64) -> Self {
        lock(&self.volumes).insert(
            id.to_string(),
            VolumeInfo {
                id: id.to_string(),
                size_gib,
            },
        );
        self
    }

    /// Replace the floating IPs, e.g. to simulate a re-association.
    pub fn set_floating_ips(&self, floating_ips: Vec<FloatingIp>) {
        *lock(&self.floating_ips) = floating_ips;
    }
}

#[async_trait]
impl CloudClient for MockCloud {
    async fn get_server(&self, cid: &str) -> Result<ServerInfo> {
        lock(&self.servers)
            .get(cid)
            .cloned()
            .ok_or_else(|| ProviderError::Api(format!("server {} not found", cid)))
    }

    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>> {
        Ok(lock(&self.floating_ips).clone())
    }

    async fn get_volume(&self, cid: &str) -> Result<VolumeInfo> {
        lock(&self.volumes)
            .get(cid)
            .cloned()
            .ok_or_else(|| ProviderError::Api(format!("volume {} not found", cid)))
    }
}

/// Records every tunnel it is asked to open.
#[derive(Debug, Default)]
pub struct MockTunnel {
    opened: Mutex<Vec<TunnelSpec>>,
}

impl MockTunnel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<TunnelSpec> {
        lock(&self.opened).clone()
    }
}

#[async_trait]
impl AgentTunnel for MockTunnel {
    async fn open(&self, spec: &TunnelSpec) -> Result<()> {
        lock(&self.opened).push(spec.clone());
        Ok(())
    }
}
