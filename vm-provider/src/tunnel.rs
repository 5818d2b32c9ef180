//! Reverse SSH tunnel that lets the agent on the VM reach the registry.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Everything needed to forward `remote_port` on the VM back to the
/// registry listening on `local_port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelSpec {
    pub host: IpAddr,
    pub user: String,
    pub ssh_port: u16,
    pub private_key: PathBuf,
    /// How long to keep retrying the SSH connection.
    pub wait: Duration,
    pub remote_port: u16,
    pub local_port: u16,
}

#[async_trait]
pub trait AgentTunnel: Send + Sync {
    /// Returns once the tunnel is established.
    async fn open(&self, spec: &TunnelSpec) -> Result<()>;
}
