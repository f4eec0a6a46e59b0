//! Deployment configuration file.
//!
//! One JSON document holds the named-account role table and the network
//! profiles. Loading validates eagerly: every role is pre-resolved on every
//! network so alias cycles, unknown alias targets and malformed addresses
//! abort before anything touches a chain.

pub mod account;
pub mod network;

pub use account::{AccountValue, NamedAccountEntry, NamedAccountsConfig};
pub use network::{
    CompanionNetworks, CompanionSide, NetworkFileConfig, NetworkTag, NetworksFileConfig,
};

use crate::config::ConfigFileError;
use crate::models::account::ResolvedAccounts;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub named_accounts: NamedAccountsConfig,
    pub networks: NetworksFileConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.networks.is_empty() {
            return Err(ConfigFileError::MissingField("networks".into()));
        }
        self.named_accounts.validate()?;
        self.networks.validate()?;
        // Pre-resolve every role on every network; resolution errors are
        // configuration errors and belong here, not at first use.
        for network in self.networks.iter() {
            self.named_accounts.resolve(&network.network)?;
        }
        Ok(())
    }

    /// Resolves the role table for a network. The network must exist; role
    /// aliases are chased transitively.
    pub fn resolve_named_accounts(
        &self,
        network: &str,
    ) -> Result<ResolvedAccounts, ConfigFileError> {
        self.networks.require(network)?;
        self.named_accounts.resolve(network)
    }
}

/// Loads and validates a configuration file.
pub fn load_config(config_file_path: &str) -> Result<Config, ConfigFileError> {
    let raw = fs::read_to_string(config_file_path)?;
    let config: Config = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
