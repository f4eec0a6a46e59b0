//! Network profile configuration.
//!
//! A network profile names an L1 or L2 deployment target: where its RPC
//! endpoint comes from, how accounts are derived, which deploy bundles run on
//! it and, for bridged setups, which networks sit on the other side of the
//! tunnel (companion networks).

pub mod collection;

pub use collection::NetworksFileConfig;

use crate::config::ConfigFileError;
use serde::{Deserialize, Serialize};
use std::env;

/// The fixed tag vocabulary. Tags are not mutually exclusive: a development
/// network emulating both layers in one process tags as testnet + L1 + L2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkTag {
    #[serde(rename = "mainnet")]
    Mainnet,
    #[serde(rename = "testnet")]
    Testnet,
    L1,
    L2,
}

/// Which side of a companion link to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionSide {
    L1,
    L2,
}

/// Per-side links to the networks on the other end of the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanionNetworks {
    #[serde(default)]
    pub l1: Option<String>,
    #[serde(default)]
    pub l2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkFileConfig {
    /// Unique network identifier (e.g. "local", "goerli", "polygon").
    pub network: String,
    /// Literal RPC endpoint URL. Mutually exclusive with `rpc_url_env`;
    /// neither set means the embedded development chain.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Environment key suffix the endpoint is read from: `ETH_NODE_URI_{KEY}`.
    #[serde(default)]
    pub rpc_url_env: Option<String>,
    /// Environment key suffix the account mnemonic is read from:
    /// `MNEMONIC_{KEY}`. Unset means deterministic dev signers.
    #[serde(default)]
    pub mnemonic_env: Option<String>,
    pub tags: Vec<NetworkTag>,
    /// Deploy bundles to run on this network, in order.
    #[serde(default)]
    pub deploy: Vec<String>,
    #[serde(default)]
    pub companion_networks: Option<CompanionNetworks>,
}

impl NetworkFileConfig {
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.network.is_empty() {
            return Err(ConfigFileError::MissingField("network name".into()));
        }
        if self.rpc_url.is_some() && self.rpc_url_env.is_some() {
            return Err(ConfigFileError::InvalidFormat(format!(
                "Network '{}' sets both rpc_url and rpc_url_env",
                self.network
            )));
        }
        if let Some(url) = &self.rpc_url {
            reqwest::Url::parse(url).map_err(|_| {
                ConfigFileError::InvalidFormat(format!("Invalid RPC URL: {}", url))
            })?;
        }
        if self.tags.is_empty() {
            return Err(ConfigFileError::MissingField(format!(
                "tags for network '{}'",
                self.network
            )));
        }
        Ok(())
    }

    /// True when the profile targets the embedded development chain.
    pub fn is_embedded(&self) -> bool {
        self.rpc_url.is_none() && self.rpc_url_env.is_none()
    }

    /// Resolves the RPC endpoint. `Ok(None)` means the embedded chain; a
    /// configured environment key that is unset is an error at this point,
    /// not at validation, so offline validation stays possible.
    pub fn resolve_rpc_url(&self) -> Result<Option<reqwest::Url>, ConfigFileError> {
        let raw = match (&self.rpc_url, &self.rpc_url_env) {
            (Some(url), _) => url.clone(),
            (None, Some(key)) => {
                let var = format!("ETH_NODE_URI_{}", key.to_uppercase());
                env::var(&var).map_err(|_| ConfigFileError::MissingEnvVar(var))?
            }
            (None, None) => return Ok(None),
        };
        let url = reqwest::Url::parse(&raw)
            .map_err(|_| ConfigFileError::InvalidFormat(format!("Invalid RPC URL: {}", raw)))?;
        Ok(Some(url))
    }

    pub fn has_tag(&self, tag: NetworkTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_testnet(&self) -> bool {
        self.has_tag(NetworkTag::Testnet)
    }

    /// The linked network on the given side, if any. The link is returned as
    /// written; whether the target exists is the caller's concern.
    pub fn companion(&self, side: CompanionSide) -> Option<&str> {
        let links = self.companion_networks.as_ref()?;
        match side {
            CompanionSide::L1 => links.l1.as_deref(),
            CompanionSide::L2 => links.l2.as_deref(),
        }
    }
}
