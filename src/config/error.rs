//! Error types for the configuration system.
//!
//! Configuration errors are terminal: they surface at load, validation or
//! resolution time, before any chain interaction, and are never retried.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Duplicate id error: {0}")]
    DuplicateId(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid ID format: {0}")]
    InvalidIdFormat(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Role '{role}' aliases unknown role '{target}'")]
    UnknownAliasTarget { role: String, target: String },
    #[error("Alias cycle detected: {0}")]
    AliasCycle(String),
    #[error("Invalid address for role '{role}': {value}")]
    InvalidAddress { role: String, value: String },
    #[error("Missing env var: {0}")]
    MissingEnvVar(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}
