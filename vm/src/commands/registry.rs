//! `registry`: run the registry for a deployment until interrupted.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use vm_config::{DeployerConfig, StateManager};
use vm_registry::RegistrySupervisor;

pub async fn handle_registry(config_path: &Path, state_path: &Path) -> Result<()> {
    let config = DeployerConfig::from_file(config_path)?;
    let state_manager = StateManager::new(state_path.to_path_buf());
    let mut state = state_manager.load()?;

    let mut supervisor = RegistrySupervisor::new(config.cloud.properties.clone());
    supervisor.configure()?;

    let started = supervisor.start(&state).await;
    if let Err(e) = started {
        if let Err(stop_err) = supervisor.stop(&mut state).await {
            warn!("Cleanup after failed start also failed: {}", stop_err);
        }
        state_manager.save(&state)?;
        return Err(e).context("Failed to start registry");
    }

    let port = supervisor.port().unwrap_or_default();
    println!("Registry running on port {port}, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Stopping registry");
    let stopped = supervisor.stop(&mut state).await;
    state_manager.save(&state)?;
    stopped?;

    println!(
        "Registry stopped, {} servers saved to {}",
        state.servers.len(),
        state_path.display()
    );
    Ok(())
}
