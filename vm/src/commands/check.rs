//! `check`: validate a deployer configuration.

use std::path::Path;

use anyhow::{Context, Result};
use vm_config::DeployerConfig;
use vm_provider::ProviderKind;
use vm_registry::RegistryConfigBuilder;

pub fn handle_check(config_path: &Path) -> Result<()> {
    let config = DeployerConfig::from_file(config_path)?;
    let kind: ProviderKind = config
        .cloud
        .plugin
        .parse()
        .context("Unsupported cloud plugin")?;
    let builder = RegistryConfigBuilder::new(&config.cloud.properties)?;

    println!("provider:     {}", kind);
    println!("registry:     port {}", builder.port());
    println!("network:      {}", config.network.label());
    println!(
        "private key:  {}",
        builder.ssh().private_key.display()
    );
    Ok(())
}
