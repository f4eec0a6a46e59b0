//! Configuration check entrypoint.
//!
//! Loads and validates the deployment configuration, prints the resolved
//! role table for the target network and, when the network is an embedded
//! one, dry-runs its deploy bundles against a fresh local chain.

use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use asset_sandbox::chain::LocalChain;
use asset_sandbox::config::{self, HarnessConfig};
use asset_sandbox::harness::deploy;
use asset_sandbox::logging::setup_logging;
use asset_sandbox::models::AccountRef;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;
    dotenv().ok();
    setup_logging();

    let settings = HarnessConfig::from_env();
    let config = config::load_config(&settings.config_file_path)
        .wrap_err_with(|| format!("Failed to load config file {}", settings.config_file_path))?;
    info!(
        "loaded {} networks and {} roles from {}",
        config.networks.len(),
        config.named_accounts.len(),
        settings.config_file_path
    );

    let resolved = config
        .resolve_named_accounts(&settings.network)
        .wrap_err_with(|| format!("Failed to resolve roles for network {}", settings.network))?;
    let mut roles: Vec<_> = resolved.iter().collect();
    roles.sort_by(|a, b| a.0.cmp(b.0));
    for (role, reference) in roles {
        match reference {
            AccountRef::Address(address) => info!("{}: {}", role, address),
            AccountRef::Index(index) => info!("{}: signer #{}", role, index),
            AccountRef::Unassigned => info!("{}: unassigned", role),
        }
    }

    let profile = config.networks.require(&settings.network)?;
    if profile.is_embedded() {
        let chain = LocalChain::new(10);
        deploy::run_deploy(&chain, &config, &settings.network)
            .await
            .wrap_err("Deploy dry-run failed")?;
        for name in [deploy::ASSET, deploy::POLYGON_ASSET, deploy::TRUSTED_FORWARDER] {
            if let Ok(address) = chain.deployment(name).await {
                info!("deployment {}: {}", name, address);
            }
        }
    } else {
        let url = profile.resolve_rpc_url()?;
        info!(
            "network {} targets {}",
            settings.network,
            url.map(|u| u.to_string()).unwrap_or_default()
        );
    }

    Ok(())
}
