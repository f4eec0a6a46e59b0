//! Configuration management.
//!
//! Named deployment roles, network profiles and harness settings, loaded from
//! a JSON file plus environment variables. Everything here is validated
//! before the first chain interaction.

mod config_file;
mod error;
mod harness_config;

pub use config_file::{
    load_config, AccountValue, CompanionNetworks, CompanionSide, Config, NamedAccountEntry,
    NamedAccountsConfig, NetworkFileConfig, NetworkTag, NetworksFileConfig,
};
pub use error::ConfigFileError;
pub use harness_config::HarnessConfig;
