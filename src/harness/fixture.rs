//! Snapshot-scoped test fixtures.
//!
//! Full deployment runs once; every test entry restores the captured
//! snapshot instead, so mutations made by one test are invisible to the
//! next while contract addresses stay stable.

use crate::chain::{ChainHandle, LocalChain, SnapshotId};
use crate::config::Config;
use crate::harness::deploy::{self, run_deploy};
use crate::harness::handles::{AssetHandle, ForwarderHandle};
use crate::harness::meta_tx::{send_meta_tx, MetaTxOutcome};
use crate::harness::HarnessError;
use crate::models::TokenId;
use alloy::primitives::{Address, Bytes, U256};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metadata hash stamped on fixture-minted assets.
pub const ASSET_METADATA_HASH: &str =
    "bafybeiaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaea";

/// Chain index assets minted on the embedded chain carry.
pub const LOCAL_CHAIN_INDEX: u32 = 1;

/// A deployed-and-wired state captured once and restored before each use.
///
/// `create` runs the setup callback (deployment plus wiring) and snapshots on
/// success; a failing setup propagates its error and captures nothing.
/// `enter` restores the snapshot and hands back the fixture object.
pub struct SnapshotFixture<T: Clone> {
    chain: LocalChain,
    snapshot: SnapshotId,
    fixture: T,
}

impl<T: Clone> SnapshotFixture<T> {
    pub async fn create<F, Fut>(chain: LocalChain, setup: F) -> Result<Self, HarnessError>
    where
        F: FnOnce(LocalChain) -> Fut,
        Fut: Future<Output = Result<T, HarnessError>>,
    {
        let fixture = setup(chain.clone()).await?;
        let snapshot = chain.snapshot().await;
        Ok(Self {
            chain,
            snapshot,
            fixture,
        })
    }

    /// Restores the pristine state and returns the fixture object.
    pub async fn enter(&self) -> Result<T, HarnessError> {
        self.chain.revert_to(self.snapshot).await?;
        Ok(self.fixture.clone())
    }

    pub fn chain(&self) -> &LocalChain {
        &self.chain
    }
}

/// A user with a pre-bound asset handle, in the manner of per-user contract
/// views handed out by the fixture.
#[derive(Clone)]
pub struct User {
    pub address: Address,
    pub asset: AssetHandle,
}

/// Everything the asset tests need: bound handles, users, the enabled minter
/// and helpers for minting and meta-transaction dispatch.
#[derive(Clone)]
pub struct AssetFixture {
    pub chain: LocalChain,
    pub asset: AssetHandle,
    pub trusted_forwarder: ForwarderHandle,
    pub users: Vec<User>,
    pub minter: Address,
    relayer: Address,
    next_pack_id: Arc<AtomicU64>,
}

impl AssetFixture {
    /// Mints `supply` units of a fresh token to `to` and returns its
    /// identifier. Supply 1 mints the non-fungible variant.
    pub async fn mint_asset(&self, to: Address, supply: u64) -> Result<TokenId, HarnessError> {
        let pack_id = self.next_pack_id.fetch_add(1, Ordering::SeqCst);
        let id = TokenId::new(to, pack_id, 0, LOCAL_CHAIN_INDEX, supply == 1);
        self.asset
            .connect(self.minter)
            .mint(
                to,
                id,
                U256::from(supply),
                Bytes::from(ASSET_METADATA_HASH.as_bytes().to_vec()),
            )
            .await?;
        Ok(id)
    }

    /// Relays a pre-encoded call through the trusted forwarder, claiming
    /// `signer_address` as sender and signing with its local key.
    pub async fn send_meta_tx(
        &self,
        to: Address,
        data: Bytes,
        signer_address: Address,
    ) -> Result<MetaTxOutcome, HarnessError> {
        let signer = self.chain.signer_for(signer_address)?;
        send_meta_tx(self.relayer, &self.trusted_forwarder, to, data, signer).await
    }
}

/// Builds the asset fixture: runs the network's deploy bundles, enables the
/// configured minter as bouncer and hands out per-user bound handles.
pub async fn asset_fixture(
    config: &Config,
    network: &str,
) -> Result<SnapshotFixture<AssetFixture>, HarnessError> {
    let chain = LocalChain::new(10);
    SnapshotFixture::create(chain, |chain| async move {
        run_deploy(&chain, config, network).await?;

        let accounts = config.resolve_named_accounts(network)?;
        let deployer = chain.account_for(&accounts.require("deployer")?)?;
        let bouncer_admin = chain.account_for(&accounts.require("assetBouncerAdmin")?)?;
        let minter = chain.account_for(&accounts.require("assetMinter")?)?;

        let asset_address = chain.deployment(deploy::ASSET).await?;
        let forwarder_address = chain.deployment(deploy::TRUSTED_FORWARDER).await?;
        let handle_chain: Arc<dyn ChainHandle> = Arc::new(chain.clone());

        let asset = AssetHandle::new(Arc::clone(&handle_chain), asset_address, deployer);
        asset.connect(bouncer_admin).set_bouncer(minter, true).await?;

        let all_accounts = chain.accounts();
        let relayer = all_accounts[0];
        let users = all_accounts[4..]
            .iter()
            .map(|address| User {
                address: *address,
                asset: asset.connect(*address),
            })
            .collect();

        let trusted_forwarder = ForwarderHandle::new(handle_chain, forwarder_address, relayer);

        Ok(AssetFixture {
            chain,
            asset,
            trusted_forwarder,
            users,
            minter,
            relayer,
            next_pack_id: Arc::new(AtomicU64::new(1)),
        })
    })
    .await
}
