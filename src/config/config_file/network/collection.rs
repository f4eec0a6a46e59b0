//! Network profile collection.
//!
//! Holds every configured network, rejects duplicate names at construction,
//! and answers lookups plus companion-network traversal.

use super::{CompanionSide, NetworkFileConfig};
use crate::config::ConfigFileError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default, Serialize, Clone)]
#[serde(transparent)]
pub struct NetworksFileConfig {
    pub networks: Vec<NetworkFileConfig>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<'de> Deserialize<'de> for NetworksFileConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let networks = Vec::<NetworkFileConfig>::deserialize(deserializer)?;
        NetworksFileConfig::new(networks).map_err(de::Error::custom)
    }
}

impl NetworksFileConfig {
    /// Builds the collection, indexing by name and rejecting duplicates.
    pub fn new(networks: Vec<NetworkFileConfig>) -> Result<Self, ConfigFileError> {
        let mut index = HashMap::new();
        for (position, network) in networks.iter().enumerate() {
            if index.insert(network.network.clone(), position).is_some() {
                return Err(ConfigFileError::DuplicateId(format!(
                    "network '{}'",
                    network.network
                )));
            }
        }
        Ok(Self { networks, index })
    }

    pub fn get(&self, name: &str) -> Option<&NetworkFileConfig> {
        self.index.get(name).map(|&position| &self.networks[position])
    }

    /// Looks up a network the caller requires to exist.
    pub fn require(&self, name: &str) -> Result<&NetworkFileConfig, ConfigFileError> {
        self.get(name)
            .ok_or_else(|| ConfigFileError::UnknownNetwork(name.to_string()))
    }

    /// The name of the network linked on `side` of `name`, if linked. Only
    /// the starting network is validated; the link target is returned as
    /// written and confirming it exists is the caller's responsibility.
    pub fn companion(
        &self,
        name: &str,
        side: CompanionSide,
    ) -> Result<Option<&str>, ConfigFileError> {
        Ok(self.require(name)?.companion(side))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkFileConfig> {
        self.networks.iter()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigFileError> {
        for network in &self.networks {
            network.validate()?;
        }
        Ok(())
    }
}
