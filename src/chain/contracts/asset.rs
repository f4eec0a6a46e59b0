//! Simulated multi-token asset contract.
//!
//! Mirrors the deployed AssetERC1155's observable behavior behind the ABI in
//! [`crate::models::abi`]: bouncer-gated minting, single and batch transfers
//! with sequential balance accounting, per-id metadata URIs, and ERC-2771
//! sender unwrapping for calls relayed through the trusted forwarder. Revert
//! reason strings are part of the mirrored surface and must match the
//! contract exactly.

use crate::chain::{CallContext, ChainError, Contract, Env};
use crate::models::abi::IAssetERC1155::IAssetERC1155Calls;
use crate::models::TokenId;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolInterface, SolValue};
use std::collections::{HashMap, HashSet};

const LENGTH_MISMATCH: &str = "AssetERC1155: ids and amounts length mismatch";
const BATCH_QUERY_MISMATCH: &str = "AssetERC1155: accounts and ids length mismatch";

#[derive(Debug, Clone)]
pub struct AssetErc1155 {
    admin: Address,
    bouncer_admin: Address,
    trusted_forwarder: Address,
    bouncers: HashSet<Address>,
    balances: HashMap<(Address, U256), U256>,
    supply: HashMap<U256, U256>,
    metadata: HashMap<U256, String>,
}

impl AssetErc1155 {
    pub fn new(admin: Address, bouncer_admin: Address, trusted_forwarder: Address) -> Self {
        Self {
            admin,
            bouncer_admin,
            trusted_forwarder,
            bouncers: HashSet::new(),
            balances: HashMap::new(),
            supply: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn is_bouncer(&self, account: Address) -> bool {
        self.bouncers.contains(&account)
    }

    /// Unwraps the effective sender. When the direct caller is the trusted
    /// forwarder, the claimed sender rides in the trailing 20 bytes of
    /// calldata (ERC-2771).
    fn effective_sender<'d>(&self, ctx: &CallContext, data: &'d [u8]) -> (Address, &'d [u8]) {
        if ctx.sender == self.trusted_forwarder && data.len() >= 20 {
            let split = data.len() - 20;
            (Address::from_slice(&data[split..]), &data[..split])
        } else {
            (ctx.sender, data)
        }
    }

    fn balance(&self, owner: Address, id: U256) -> U256 {
        self.balances.get(&(owner, id)).copied().unwrap_or_default()
    }

    /// Moves `value` units of `id` from `from` to `to` against live balances.
    /// Deducts before crediting so a self-transfer nets out to no change.
    fn transfer(
        &mut self,
        sender: Address,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
    ) -> Result<(), ChainError> {
        if sender != from {
            return Err(ChainError::revert("OPERATOR_!AUTH"));
        }
        let from_balance = self.balance(from, id);
        if from_balance < value {
            return Err(ChainError::revert("BALANCE_TOO_LOW"));
        }
        self.balances.insert((from, id), from_balance - value);
        let to_balance = self.balance(to, id);
        self.balances.insert((to, id), to_balance + value);
        Ok(())
    }

    fn mint(
        &mut self,
        sender: Address,
        account: Address,
        id: U256,
        supply: U256,
        data: &[u8],
    ) -> Result<(), ChainError> {
        if !self.bouncers.contains(&sender) {
            return Err(ChainError::revert("!BOUNCER"));
        }
        if self.metadata.contains_key(&id) {
            return Err(ChainError::revert("ID_TAKEN"));
        }
        let hash = String::from_utf8_lossy(data).into_owned();
        self.metadata.insert(id, hash);
        let minted = self.balance(account, id);
        self.balances.insert((account, id), minted + supply);
        let total = self.supply.get(&id).copied().unwrap_or_default();
        self.supply.insert(id, total + supply);
        Ok(())
    }

    fn set_bouncer(
        &mut self,
        sender: Address,
        bouncer: Address,
        enabled: bool,
    ) -> Result<(), ChainError> {
        if sender != self.bouncer_admin {
            return Err(ChainError::revert("!BOUNCER_ADMIN"));
        }
        if enabled {
            self.bouncers.insert(bouncer);
        } else {
            self.bouncers.remove(&bouncer);
        }
        Ok(())
    }

    fn token_uri(&self, id: U256) -> Result<String, ChainError> {
        let hash = self
            .metadata
            .get(&id)
            .ok_or_else(|| ChainError::revert("NFT_!EXIST_||_FT_!MINTED"))?;
        let pack_index = TokenId::from(id).pack_index();
        Ok(format!("ipfs://{}/{}.json", hash, pack_index))
    }
}

impl Contract for AssetErc1155 {
    fn execute(
        &mut self,
        _env: &mut Env<'_>,
        ctx: &CallContext,
        data: &[u8],
    ) -> Result<Bytes, ChainError> {
        let (sender, data) = self.effective_sender(ctx, data);
        match IAssetERC1155Calls::abi_decode(data)? {
            IAssetERC1155Calls::safeTransferFrom(call) => {
                self.transfer(sender, call.from, call.to, call.id, call.value)?;
                Ok(Bytes::new())
            }
            IAssetERC1155Calls::safeBatchTransferFrom(call) => {
                if call.ids.len() != call.values.len() {
                    return Err(ChainError::revert(LENGTH_MISMATCH));
                }
                // Pairs apply in sequence against live balances; any failing
                // pair reverts the whole batch through the chain's rollback.
                for (id, value) in call.ids.iter().zip(call.values.iter()) {
                    self.transfer(sender, call.from, call.to, *id, *value)?;
                }
                Ok(Bytes::new())
            }
            IAssetERC1155Calls::mint(call) => {
                self.mint(sender, call.account, call.id, call.value, &call.data)?;
                Ok(Bytes::new())
            }
            IAssetERC1155Calls::mintMultiple(call) => {
                if call.ids.len() != call.values.len() {
                    return Err(ChainError::revert(LENGTH_MISMATCH));
                }
                for (id, value) in call.ids.iter().zip(call.values.iter()) {
                    self.mint(sender, call.account, *id, *value, &call.data)?;
                }
                Ok(Bytes::new())
            }
            IAssetERC1155Calls::setBouncer(call) => {
                self.set_bouncer(sender, call.bouncer, call.enabled)?;
                Ok(Bytes::new())
            }
            other => self.answer_view(&other),
        }
    }

    fn view(&self, _ctx: &CallContext, data: &[u8]) -> Result<Bytes, ChainError> {
        self.answer_view(&IAssetERC1155Calls::abi_decode(data)?)
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }
}

impl AssetErc1155 {
    fn answer_view(&self, call: &IAssetERC1155Calls) -> Result<Bytes, ChainError> {
        match call {
            IAssetERC1155Calls::balanceOf(query) => {
                Ok(self.balance(query.account, query.id).abi_encode().into())
            }
            IAssetERC1155Calls::balanceOfBatch(query) => {
                if query.accounts.len() != query.ids.len() {
                    return Err(ChainError::revert(BATCH_QUERY_MISMATCH));
                }
                let balances: Vec<U256> = query
                    .accounts
                    .iter()
                    .zip(query.ids.iter())
                    .map(|(account, id)| self.balance(*account, *id))
                    .collect();
                Ok(balances.abi_encode().into())
            }
            IAssetERC1155Calls::totalSupply(query) => Ok(self
                .supply
                .get(&query.id)
                .copied()
                .unwrap_or_default()
                .abi_encode()
                .into()),
            IAssetERC1155Calls::tokenURI(query) => {
                Ok(self.token_uri(query.id)?.abi_encode().into())
            }
            _ => Err(ChainError::revert("CALL_NOT_VIEW")),
        }
    }
}
