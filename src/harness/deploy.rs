//! Deploy-bundle runner.
//!
//! A network profile lists the deploy bundles to run, in order. Each bundle
//! resolves the roles it needs through the configuration layer and deploys
//! its contracts under stable names on the target chain.

use crate::chain::contracts::{AssetErc1155, TrustedForwarder};
use crate::chain::{ChainError, LocalChain};
use crate::config::Config;
use crate::harness::HarnessError;
use crate::models::ResolvedAccounts;
use alloy::primitives::Address;
use log::info;

/// Deployment name of the L1 asset contract.
pub const ASSET: &str = "Asset";
/// Deployment name of the L2 asset contract.
pub const POLYGON_ASSET: &str = "PolygonAsset";
/// Deployment name of the meta-transaction relay.
pub const TRUSTED_FORWARDER: &str = "TrustedForwarder";

/// Runs the network's deploy bundles against the chain.
pub async fn run_deploy(
    chain: &LocalChain,
    config: &Config,
    network: &str,
) -> Result<(), HarnessError> {
    let profile = config.networks.require(network)?;
    let accounts = config.resolve_named_accounts(network)?;
    for bundle in &profile.deploy {
        info!("running deploy bundle '{}' on '{}'", bundle, network);
        match bundle.as_str() {
            "deploy_l1" => deploy_asset(chain, &accounts, ASSET).await?,
            "deploy_l2" => deploy_asset(chain, &accounts, POLYGON_ASSET).await?,
            other => return Err(HarnessError::UnknownDeployBundle(other.to_string())),
        }
    }
    Ok(())
}

/// Deploys the forwarder once; both layers of a dev network share it.
async fn ensure_forwarder(chain: &LocalChain) -> Result<Address, ChainError> {
    match chain.deployment(TRUSTED_FORWARDER).await {
        Ok(address) => Ok(address),
        Err(ChainError::UnknownDeployment(_)) => {
            chain
                .deploy(TRUSTED_FORWARDER, Box::new(TrustedForwarder::default()))
                .await
        }
        Err(err) => Err(err),
    }
}

async fn deploy_asset(
    chain: &LocalChain,
    accounts: &ResolvedAccounts,
    name: &str,
) -> Result<(), HarnessError> {
    let forwarder = ensure_forwarder(chain).await?;
    let admin = chain.account_for(&accounts.require("assetAdmin")?)?;
    let bouncer_admin = chain.account_for(&accounts.require("assetBouncerAdmin")?)?;
    let address = chain
        .deploy(name, Box::new(AssetErc1155::new(admin, bouncer_admin, forwarder)))
        .await?;
    info!("deployed '{}' at {}", name, address);
    Ok(())
}
