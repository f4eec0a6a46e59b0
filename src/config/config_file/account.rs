//! Named deployment accounts.
//!
//! The role table maps logical role names ("deployer", "sandAdmin",
//! "treasury", …) to per-network account values. An entry is either a single
//! value applying everywhere or a map of network name to value with an
//! optional `default` key. A value is a literal address, a signer index, the
//! name of another role (an alias, chased transitively), or `null` for "no
//! account on this network".
//!
//! Resolution is a pure function of the table: depth-first over the alias
//! graph, memoized per pass, with the in-progress chain tracked so a cycle
//! fails fast naming the full path instead of looping.

use crate::config::ConfigFileError;
use crate::models::account::{AccountRef, ResolvedAccounts};
use alloy::primitives::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single account value as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountValue {
    /// Index into the network's locally available signer list.
    Index(u32),
    /// Literal address (`0x`-prefixed) or the name of another role.
    Literal(String),
    /// No account assigned (`null`).
    Unassigned,
}

/// One role's entry: a bare value or a per-network map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedAccountEntry {
    Value(AccountValue),
    PerNetwork(BTreeMap<String, AccountValue>),
}

/// The full role table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedAccountsConfig {
    pub accounts: BTreeMap<String, NamedAccountEntry>,
}

impl NamedAccountsConfig {
    pub fn contains(&self, role: &str) -> bool {
        self.accounts.contains_key(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &String> {
        self.accounts.keys()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Validates role names. Values are checked during resolution, where the
    /// target network is known.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        let name_regex = Regex::new(r"^[a-zA-Z0-9-_]+$").map_err(|e| {
            ConfigFileError::InternalError(format!("Regex compilation error: {}", e))
        })?;
        for role in self.accounts.keys() {
            if role.is_empty() {
                return Err(ConfigFileError::MissingField("role name".into()));
            }
            if !name_regex.is_match(role) {
                return Err(ConfigFileError::InvalidIdFormat(format!(
                    "Role name must contain only letters, numbers, dashes and underscores: {}",
                    role
                )));
            }
        }
        Ok(())
    }

    /// The raw value selected for a role on a network: the per-network
    /// override if present, else the `default` entry. A per-network entry
    /// with neither names no account on this network.
    fn raw_value(&self, role: &str, network: &str) -> Option<&AccountValue> {
        match self.accounts.get(role)? {
            NamedAccountEntry::Value(value) => Some(value),
            NamedAccountEntry::PerNetwork(map) => map.get(network).or_else(|| map.get("default")),
        }
    }

    /// Resolves every role for `network` into concrete account references,
    /// chasing aliases transitively.
    ///
    /// Signer indices are deliberately not range-checked here; that failure
    /// belongs to signer lookup.
    pub fn resolve(&self, network: &str) -> Result<ResolvedAccounts, ConfigFileError> {
        let mut memo: HashMap<String, AccountRef> = HashMap::new();
        for role in self.accounts.keys() {
            let mut chain = Vec::new();
            self.resolve_role(role, network, &mut memo, &mut chain)?;
        }
        Ok(ResolvedAccounts::new(network.to_string(), memo))
    }

    fn resolve_role(
        &self,
        role: &str,
        network: &str,
        memo: &mut HashMap<String, AccountRef>,
        chain: &mut Vec<String>,
    ) -> Result<AccountRef, ConfigFileError> {
        if let Some(hit) = memo.get(role) {
            return Ok(*hit);
        }
        if chain.iter().any(|seen| seen == role) {
            chain.push(role.to_string());
            return Err(ConfigFileError::AliasCycle(chain.join(" -> ")));
        }
        chain.push(role.to_string());

        let value = self
            .raw_value(role, network)
            .cloned()
            .unwrap_or(AccountValue::Unassigned);
        let reference = match value {
            AccountValue::Index(index) => AccountRef::Index(index),
            AccountValue::Unassigned => AccountRef::Unassigned,
            AccountValue::Literal(text) => {
                if text.starts_with("0x") {
                    let address =
                        text.parse::<Address>()
                            .map_err(|_| ConfigFileError::InvalidAddress {
                                role: role.to_string(),
                                value: text.clone(),
                            })?;
                    AccountRef::Address(address)
                } else if self.contains(&text) {
                    self.resolve_role(&text, network, memo, chain)?
                } else {
                    return Err(ConfigFileError::UnknownAliasTarget {
                        role: role.to_string(),
                        target: text,
                    });
                }
            }
        };

        chain.pop();
        memo.insert(role.to_string(), reference);
        Ok(reference)
    }
}
