// Command handlers

use anyhow::Result;
use tracing::debug;

use crate::cli::{Args, Command};

pub mod check;
pub mod registry;

/// Main command dispatcher
pub async fn execute_command(args: Args) -> Result<()> {
    match args.command {
        Command::Registry { config, state } => {
            debug!("Handling registry command");
            registry::handle_registry(&config, &state).await
        }
        Command::Check { config } => {
            debug!("Handling check command");
            check::handle_check(&config)
        }
    }
}
