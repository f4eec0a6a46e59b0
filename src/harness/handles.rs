//! Signer-bound contract handles.
//!
//! A handle pairs a deployed contract address with the account that signs its
//! transactions. `connect` re-binds the same contract to a different signer,
//! mirroring how tests hand each user their own view of one deployment.

use crate::chain::{ChainError, ChainHandle};
use crate::models::abi::{ForwardRequest, IAssetERC1155, IForwarder};
use crate::models::TokenId;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};
use std::sync::Arc;

/// Call surface of a deployed multi-token asset contract.
#[derive(Clone)]
pub struct AssetHandle {
    chain: Arc<dyn ChainHandle>,
    pub address: Address,
    caller: Address,
}

impl AssetHandle {
    pub fn new(chain: Arc<dyn ChainHandle>, address: Address, caller: Address) -> Self {
        Self {
            chain,
            address,
            caller,
        }
    }

    /// The same contract bound to a different transaction signer.
    pub fn connect(&self, caller: Address) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            address: self.address,
            caller,
        }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub async fn mint(
        &self,
        account: Address,
        id: TokenId,
        supply: U256,
        data: Bytes,
    ) -> Result<(), ChainError> {
        let call = IAssetERC1155::mintCall {
            account,
            id: id.into(),
            value: supply,
            data,
        };
        self.send(call.abi_encode()).await
    }

    pub async fn mint_multiple(
        &self,
        account: Address,
        ids: Vec<U256>,
        values: Vec<U256>,
        data: Bytes,
    ) -> Result<(), ChainError> {
        let call = IAssetERC1155::mintMultipleCall {
            account,
            ids,
            values,
            data,
        };
        self.send(call.abi_encode()).await
    }

    pub async fn set_bouncer(&self, bouncer: Address, enabled: bool) -> Result<(), ChainError> {
        let call = IAssetERC1155::setBouncerCall { bouncer, enabled };
        self.send(call.abi_encode()).await
    }

    pub async fn safe_transfer_from(
        &self,
        from: Address,
        to: Address,
        id: TokenId,
        value: U256,
        data: Bytes,
    ) -> Result<(), ChainError> {
        let (_, calldata) = self.populate_safe_transfer_from(from, to, id, value, data);
        self.send(calldata.to_vec()).await
    }

    pub async fn safe_batch_transfer_from(
        &self,
        from: Address,
        to: Address,
        ids: &[TokenId],
        values: &[U256],
        data: Bytes,
    ) -> Result<(), ChainError> {
        let (_, calldata) = self.populate_safe_batch_transfer_from(from, to, ids, values, data);
        self.send(calldata.to_vec()).await
    }

    /// Encodes a single transfer without submitting it; used to build
    /// meta-transaction payloads.
    pub fn populate_safe_transfer_from(
        &self,
        from: Address,
        to: Address,
        id: TokenId,
        value: U256,
        data: Bytes,
    ) -> (Address, Bytes) {
        let call = IAssetERC1155::safeTransferFromCall {
            from,
            to,
            id: id.into(),
            value,
            data,
        };
        (self.address, call.abi_encode().into())
    }

    /// Batch variant of [`Self::populate_safe_transfer_from`].
    pub fn populate_safe_batch_transfer_from(
        &self,
        from: Address,
        to: Address,
        ids: &[TokenId],
        values: &[U256],
        data: Bytes,
    ) -> (Address, Bytes) {
        let call = IAssetERC1155::safeBatchTransferFromCall {
            from,
            to,
            ids: ids.iter().map(|id| (*id).into()).collect(),
            values: values.to_vec(),
            data,
        };
        (self.address, call.abi_encode().into())
    }

    pub async fn balance_of(&self, account: Address, id: TokenId) -> Result<U256, ChainError> {
        let call = IAssetERC1155::balanceOfCall {
            account,
            id: id.into(),
        };
        let output = self.chain.call(self.address, call.abi_encode().into()).await?;
        Ok(U256::abi_decode(&output)?)
    }

    pub async fn balance_of_batch(
        &self,
        accounts: Vec<Address>,
        ids: &[TokenId],
    ) -> Result<Vec<U256>, ChainError> {
        let call = IAssetERC1155::balanceOfBatchCall {
            accounts,
            ids: ids.iter().map(|id| (*id).into()).collect(),
        };
        let output = self.chain.call(self.address, call.abi_encode().into()).await?;
        Ok(Vec::<U256>::abi_decode(&output)?)
    }

    pub async fn total_supply(&self, id: TokenId) -> Result<U256, ChainError> {
        let call = IAssetERC1155::totalSupplyCall { id: id.into() };
        let output = self.chain.call(self.address, call.abi_encode().into()).await?;
        Ok(U256::abi_decode(&output)?)
    }

    pub async fn token_uri(&self, id: TokenId) -> Result<String, ChainError> {
        let call = IAssetERC1155::tokenURICall { id: id.into() };
        let output = self.chain.call(self.address, call.abi_encode().into()).await?;
        Ok(String::abi_decode(&output)?)
    }

    async fn send(&self, calldata: Vec<u8>) -> Result<(), ChainError> {
        self.chain
            .execute(self.caller, self.address, calldata.into())
            .await
            .map(|_| ())
    }
}

/// Call surface of the trusted forwarder.
#[derive(Clone)]
pub struct ForwarderHandle {
    chain: Arc<dyn ChainHandle>,
    pub address: Address,
    caller: Address,
}

impl ForwarderHandle {
    pub fn new(chain: Arc<dyn ChainHandle>, address: Address, caller: Address) -> Self {
        Self {
            chain,
            address,
            caller,
        }
    }

    pub fn connect(&self, caller: Address) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            address: self.address,
            caller,
        }
    }

    /// Submits an envelope. The returned flag reports whether the inner call
    /// ran; rejected envelopes return `false` rather than reverting.
    pub async fn execute(
        &self,
        req: ForwardRequest,
        signature: Bytes,
    ) -> Result<bool, ChainError> {
        let call = IForwarder::executeCall { req, signature };
        let output = self
            .chain
            .execute(self.caller, self.address, call.abi_encode().into())
            .await?;
        Ok(bool::abi_decode(&output)?)
    }

    pub async fn get_nonce(&self, from: Address) -> Result<U256, ChainError> {
        let call = IForwarder::getNonceCall { from };
        let output = self.chain.call(self.address, call.abi_encode().into()).await?;
        Ok(U256::abi_decode(&output)?)
    }
}
