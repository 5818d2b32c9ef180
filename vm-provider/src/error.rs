//! Error types for provider operations.

use thiserror::Error;
use vm_core::error::VmError;
use vm_registry::RegistryError;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unable to discover IP address of {handle}: {reason}")]
    Discovery { handle: String, reason: String },

    #[error("Cloud API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    State(#[from] VmError),
}

impl ProviderError {
    pub(crate) fn discovery(handle: &str, reason: impl Into<String>) -> Self {
        Self::Discovery {
            handle: handle.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
