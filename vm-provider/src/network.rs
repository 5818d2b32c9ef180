//! Address discovery for managed servers.

use std::fmt;
use std::net::IpAddr;

use tracing::debug;

use crate::cloud::{CloudClient, ServerInfo};
use crate::error::{ProviderError, Result};

/// An address picked for a server. Looked up fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAddress {
    pub ip: IpAddr,
    pub version: u8,
    pub floating: bool,
    /// Network the address was found on; `None` for floating IPs.
    pub label: Option<String>,
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

/// Resolves reachable addresses of a server through the cloud API.
pub struct NetworkIntrospector<'a> {
    cloud: &'a dyn CloudClient,
}

impl<'a> NetworkIntrospector<'a> {
    pub fn new(cloud: &'a dyn CloudClient) -> Self {
        Self { cloud }
    }

    /// Floating IP associated with the server, or its service address on
    /// `label` when it has none. Ties go to the first match in provider
    /// order.
    pub async fn discover_external_ip(&self, handle: &str, label: &str) -> Result<NetworkAddress> {
        let server = self.cloud.get_server(handle).await?;
        let floating_ips = self.cloud.list_floating_ips().await?;

        let associated = floating_ips
            .iter()
            .find(|fip| fip.instance_id.as_deref() == Some(server.id.as_str()));

        if let Some(fip) = associated {
            let ip: IpAddr = fip.ip.parse().map_err(|_| {
                ProviderError::discovery(handle, format!("invalid floating IP '{}'", fip.ip))
            })?;
            debug!("Server {} has floating IP {}", handle, ip);
            return Ok(NetworkAddress {
                ip,
                version: if ip.is_ipv4() { 4 } else { 6 },
                floating: true,
                label: None,
            });
        }

        debug!("Server {} has no floating IP, using network '{}'", handle, label);
        service_address(handle, &server, label)
    }

    /// First IPv4 address of the server on network `label`.
    pub async fn discover_service_ip(&self, handle: &str, label: &str) -> Result<NetworkAddress> {
        let server = self.cloud.get_server(handle).await?;
        service_address(handle, &server, label)
    }
}

fn service_address(handle: &str, server: &ServerInfo, label: &str) -> Result<NetworkAddress> {
    let entries = server
        .addresses
        .get(label)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| {
            ProviderError::discovery(handle, format!("no addresses on network '{}'", label))
        })?;

    let entry = entries
        .iter()
        .find(|entry| entry.version == 4)
        .ok_or_else(|| {
            ProviderError::discovery(handle, format!("no IPv4 address on network '{}'", label))
        })?;

    let ip = entry.addr.parse().map_err(|_| {
        ProviderError::discovery(handle, format!("invalid address '{}'", entry.addr))
    })?;

    Ok(NetworkAddress {
        ip,
        version: 4,
        floating: false,
        label: Some(label.to_string()),
    })
}
