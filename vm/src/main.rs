// External crates
use clap::Parser;

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut log_settings = vm_logging::LogSettings::from_env();
    if args.debug {
        log_settings.level = "debug".to_string();
    }
    let _log_guard = vm_logging::init_with_settings(&log_settings);

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
