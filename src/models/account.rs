//! Resolved account references.
//!
//! A named deployment role resolves, for a given network, to exactly one
//! [`AccountRef`]: a literal address, an index into the locally available
//! signer list, or nothing at all. [`ResolvedAccounts`] is the fully
//! alias-resolved role table produced by the configuration layer for one
//! network.

use crate::config::ConfigFileError;
use alloy::primitives::Address;
use std::collections::HashMap;

/// A role's concrete account reference on a specific network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    /// A literal account address.
    Address(Address),
    /// An index into the locally available signer list. The index is not
    /// range-checked here; an out-of-range index surfaces at signer lookup.
    Index(u32),
    /// No account assigned on this network. Consumers must treat the role as
    /// disabled rather than substituting a default.
    Unassigned,
}

impl AccountRef {
    /// Returns `true` unless the role is unassigned on this network.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, AccountRef::Unassigned)
    }

    /// Returns the literal address, if this reference is one.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            AccountRef::Address(address) => Some(*address),
            _ => None,
        }
    }

    /// Returns the signer index, if this reference is one.
    pub fn as_index(&self) -> Option<u32> {
        match self {
            AccountRef::Index(index) => Some(*index),
            _ => None,
        }
    }
}

/// The fully alias-resolved role table for one network.
///
/// Produced by [`crate::config::Config::resolve_named_accounts`]; resolution
/// is pure and deterministic, so two resolutions of the same table for the
/// same network compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccounts {
    network: String,
    accounts: HashMap<String, AccountRef>,
}

impl ResolvedAccounts {
    pub fn new(network: String, accounts: HashMap<String, AccountRef>) -> Self {
        Self { network, accounts }
    }

    /// The network this table was resolved for.
    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn get(&self, role: &str) -> Option<AccountRef> {
        self.accounts.get(role).copied()
    }

    /// Looks up a role that the caller requires to exist in the table.
    pub fn require(&self, role: &str) -> Result<AccountRef, ConfigFileError> {
        self.get(role)
            .ok_or_else(|| ConfigFileError::UnknownRole(role.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AccountRef)> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
