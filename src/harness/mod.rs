//! Contract interaction test harness.
//!
//! Deploys the configured contracts onto a chain, hands out signer-bound
//! contract handles, and drives calls either directly or through the trusted
//! forwarder. Test isolation comes from the snapshot-scoped fixture, not from
//! redeploying per test.

pub mod deploy;
pub mod fixture;
pub mod handles;
pub mod meta_tx;

pub use fixture::{asset_fixture, AssetFixture, SnapshotFixture, User};
pub use handles::{AssetHandle, ForwarderHandle};
pub use meta_tx::{send_meta_tx, MetaTxOutcome};

use crate::chain::ChainError;
use crate::config::ConfigFileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Config(#[from] ConfigFileError),
    #[error("unknown deploy bundle: {0}")]
    UnknownDeployBundle(String),
    #[error("signing failed: {0}")]
    Signer(#[from] alloy::signers::Error),
}

impl HarnessError {
    /// The contract revert reason, if the failure was a revert.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            HarnessError::Chain(err) => err.revert_reason(),
            _ => None,
        }
    }
}
