//! Error types for registry supervision.

use std::time::Duration;
use thiserror::Error;

use crate::supervisor::SupervisorState;

/// Errors raised while configuring, starting or stopping the registry.
///
/// None of these are retried by the supervisor: each one aborts the
/// current operation after temporaries have been released.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Missing or invalid static configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The registry executable is not on the search path.
    #[error("{executable} command not found - {install_hint}")]
    MissingDependency {
        executable: String,
        install_hint: String,
    },

    /// The registry process exited while it was expected to be starting up.
    #[error("`{command}` failed, exit status={}", describe_exit(.exit_code))]
    ProcessStartup {
        command: String,
        exit_code: Option<i32>,
    },

    /// The registry never answered on its port within the deadline.
    #[error("Cannot access registry at {url} after {elapsed:?}: {last_error}")]
    ReadinessTimeout {
        url: String,
        elapsed: Duration,
        last_error: String,
    },

    #[error("Cannot {operation} registry while it is {state}")]
    InvalidState {
        operation: &'static str,
        state: SupervisorState,
    },

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml_ng::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
