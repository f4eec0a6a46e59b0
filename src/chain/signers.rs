//! Local signer set for the embedded chain.
//!
//! Dev signers are derived deterministically (private keys `1..=N`), so
//! account addresses are stable across runs and across snapshot restores.

use crate::chain::error::ChainError;
use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;

/// The locally available signers, addressable by index or by address.
#[derive(Debug, Clone)]
pub struct SignerSet {
    signers: Vec<PrivateKeySigner>,
}

impl SignerSet {
    /// Derives `count` deterministic dev signers.
    pub fn dev(count: usize) -> Self {
        let signers = (0..count)
            .map(|i| {
                let key = B256::from(U256::from(i as u64 + 1));
                // Keys 1..=N are always valid secp256k1 scalars.
                PrivateKeySigner::from_bytes(&key).expect("dev key is a valid scalar")
            })
            .collect();
        Self { signers }
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(|s| s.address()).collect()
    }

    /// Looks up a signer by account index. Role resolution does not validate
    /// indices; an out-of-range index fails here.
    pub fn by_index(&self, index: u32) -> Result<&PrivateKeySigner, ChainError> {
        self.signers
            .get(index as usize)
            .ok_or(ChainError::SignerOutOfRange {
                index,
                available: self.signers.len(),
            })
    }

    pub fn by_address(&self, address: Address) -> Result<&PrivateKeySigner, ChainError> {
        self.signers
            .iter()
            .find(|s| s.address() == address)
            .ok_or(ChainError::NoLocalSigner(address))
    }

    pub fn contains(&self, address: Address) -> bool {
        self.signers.iter().any(|s| s.address() == address)
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}
