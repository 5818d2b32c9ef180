//! Deployer configuration and deployment state.
//!
//! Configuration is an explicit value loaded from YAML and passed to
//! whoever needs it; there is no process-wide settings object.

pub mod config;
pub mod state;

pub use config::{
    CloudConfig, CloudProperties, DeployerConfig, NetworkConfig, OpenStackProperties,
    RegistryProperties, ResourcesConfig, DEFAULT_NETWORK_LABEL,
};
pub use state::{DeploymentState, ServerRecord, StateManager};
