use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Umbrella error for configuration and deployment-state handling.
#[derive(Error, Debug)]
pub enum VmError {
    Config(String),
    Io(#[from] std::io::Error),
    Internal(String),
    Filesystem(String),
    Serialization(String),
}

impl Display for VmError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            VmError::Config(s) => write!(f, "Configuration error: {}", s),
            VmError::Io(e) => write!(f, "I/O error: {}", e),
            VmError::Internal(s) => write!(f, "Internal error: {}", s),
            VmError::Filesystem(s) => write!(f, "Filesystem error: {}", s),
            VmError::Serialization(s) => write!(f, "Serialization error: {}", s),
        }
    }
}

impl From<serde_yaml_ng::Error> for VmError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        VmError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VmError>;
