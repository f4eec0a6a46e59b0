//! Error types for the embedded chain.

use alloy::primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    /// A contract rejected the call with a reason string. Reverts are
    /// terminal, deterministic outcomes for the given state and are never
    /// retried; the reason is exposed verbatim for exact-match assertions.
    #[error("execution reverted: {0}")]
    Revert(String),
    #[error("no contract deployed at {0}")]
    UnknownContract(Address),
    #[error("no deployment named '{0}'")]
    UnknownDeployment(String),
    #[error("deployment '{0}' already exists")]
    DeploymentExists(String),
    #[error("signer index {index} out of range: {available} local signers")]
    SignerOutOfRange { index: u32, available: usize },
    #[error("no local signer for address {0}")]
    NoLocalSigner(Address),
    #[error("account reference is unassigned on this network")]
    UnassignedAccount,
    #[error("unknown snapshot id {0}")]
    UnknownSnapshot(u64),
    #[error("ABI error: {0}")]
    Abi(#[from] alloy::sol_types::Error),
}

impl ChainError {
    /// Builds a revert carrying the given reason string.
    pub fn revert(reason: impl Into<String>) -> Self {
        ChainError::Revert(reason.into())
    }

    /// The contract's reason string, if this error is a revert.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            ChainError::Revert(reason) => Some(reason),
            _ => None,
        }
    }
}
