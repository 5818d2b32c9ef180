// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vm-deployer")]
#[command(about = "Runs the address registry for a managed VM deployment")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the registry for a deployment and keep it running until Ctrl-C
    Registry {
        /// Deployer configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// Deployment state file; created if missing
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Validate a deployer configuration without starting anything
    Check {
        /// Deployer configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}
