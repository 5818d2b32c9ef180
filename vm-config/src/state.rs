//! Deployment state persistence.
//!
//! The deployment state survives restarts of the deployer. Among other
//! things it carries the registry's server records, which are replayed into
//! the registry store on start and drained back out on stop.

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_yaml_ng as serde_yaml;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use vm_core::error::{Result, VmError};

/// One VM registered with the registry service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerRecord {
    pub server_id: String,
    /// Opaque settings blob, stored verbatim.
    pub settings: String,
}

impl ServerRecord {
    pub fn new(server_id: impl Into<String>, settings: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            settings: settings.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stemcell_cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cid: Option<String>,
    /// Registry server records, in store order.
    #[serde(default)]
    pub servers: Vec<ServerRecord>,
}

/// Loads and saves [`DeploymentState`] as YAML under an exclusive file lock.
#[derive(Debug, Clone)]
pub struct StateManager {
    state_file: PathBuf,
    lock_file: PathBuf,
}

impl StateManager {
    pub fn new(state_file: PathBuf) -> Self {
        let lock_file = state_file.with_extension("lock");
        Self {
            state_file,
            lock_file,
        }
    }

    pub fn state_file_path(&self) -> &Path {
        &self.state_file
    }

    fn acquire_lock(&self) -> Result<File> {
        if let Some(parent) = self.lock_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.lock_file)?;

        lock_file.lock_exclusive().map_err(|e| {
            VmError::Internal(format!(
                "Failed to acquire lock {}: {}",
                self.lock_file.display(),
                e
            ))
        })?;

        Ok(lock_file)
    }

    /// Load the deployment state. A missing file yields an empty state.
    pub fn load(&self) -> Result<DeploymentState> {
        let _lock = self.acquire_lock()?;

        if !self.state_file.exists() {
            debug!("No state file at {}", self.state_file.display());
            return Ok(DeploymentState::default());
        }

        let content = fs::read_to_string(&self.state_file)?;
        serde_yaml::from_str(&content).map_err(|e| {
            VmError::Serialization(format!(
                "Failed to parse state file {}: {}",
                self.state_file.display(),
                e
            ))
        })
    }

    /// Save the deployment state atomically.
    pub fn save(&self, state: &DeploymentState) -> Result<()> {
        let _lock = self.acquire_lock()?;

        let state_dir = match self.state_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&state_dir).map_err(|e| {
            VmError::Filesystem(format!(
                "Failed to create state directory {}: {}",
                state_dir.display(),
                e
            ))
        })?;

        let yaml_content = serde_yaml::to_string(state)?;

        let mut temp_file = vm_core::temp_dir::create_temp_file_in(&state_dir, ".state-", ".tmp")?;
        temp_file.write_all(yaml_content.as_bytes()).map_err(|e| {
            VmError::Filesystem(format!(
                "Failed to write temporary state file {}: {}",
                temp_file.path().display(),
                e
            ))
        })?;

        temp_file.persist(&self.state_file).map_err(|e| {
            VmError::Filesystem(format!(
                "Failed to move state file to final location {}: {}",
                self.state_file.display(),
                e.error
            ))
        })?;

        debug!(
            "Saved deployment state ({} servers) to {}",
            state.servers.len(),
            self.state_file.display()
        );
        Ok(())
    }
}
