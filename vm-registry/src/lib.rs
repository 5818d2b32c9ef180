//! # VM Registry
//!
//! Lifecycle of the address registry that runs next to a managed VM and
//! lets the VM's agent fetch its settings at boot.
//!
//! ## Lifecycle
//!
//! ```text
//! configure: validate settings, allocate temp store + config file
//! start:     migrate + seed store, spawn `openstack_registry -c <config>`,
//!            liveness check, readiness probe on http://127.0.0.1:<port>/
//! stop:      SIGINT, wait, drain store into deployment state, delete temps
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vm_config::{DeployerConfig, DeploymentState};
//! use vm_registry::RegistrySupervisor;
//!
//! # async fn example(config: DeployerConfig) -> vm_registry::Result<()> {
//! let mut state = DeploymentState::default();
//! let mut supervisor = RegistrySupervisor::new(config.cloud.properties.clone());
//! supervisor.configure()?;
//! supervisor.start(&state).await?;
//! // ... talk to the VM ...
//! supervisor.stop(&mut state).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod readiness;
pub mod store;
pub mod supervisor;

pub use config::{RegistryConfig, RegistryConfigBuilder, RegistryEndpoint, SshSettings};
pub use error::{RegistryError, Result};
pub use store::TransientStore;
pub use supervisor::{RegistrySupervisor, SupervisorSettings, SupervisorState};

/// Registry executable name
pub const REGISTRY_EXECUTABLE: &str = "openstack_registry";

/// How to get the registry executable when it is missing
pub const INSTALL_HINT: &str = "run 'gem install bosh_openstack_registry'";

/// Host the readiness probe connects to
pub const DEFAULT_HOST: &str = "127.0.0.1";
