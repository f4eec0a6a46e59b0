//! Integration tests for the shipped deployment configuration: role
//! resolution across networks, aliasing, companion links and failure modes.

use asset_sandbox::config::{load_config, CompanionSide, Config, ConfigFileError};
use asset_sandbox::models::AccountRef;

fn shipped_config() -> Config {
    load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config/config.json"))
        .expect("shipped config loads")
}

#[test]
fn shipped_config_validates() {
    let config = shipped_config();
    assert!(config.validate().is_ok());
    assert_eq!(config.networks.len(), 6);
}

#[test]
fn roles_resolve_to_indices_on_the_local_network() {
    let config = shipped_config();
    let resolved = config.resolve_named_accounts("local").unwrap();
    assert_eq!(resolved.get("deployer"), Some(AccountRef::Index(1)));
    assert_eq!(resolved.get("sandAdmin"), Some(AccountRef::Index(2)));
    assert_eq!(resolved.get("assetMinter"), Some(AccountRef::Index(3)));
}

#[test]
fn per_network_overrides_take_precedence() {
    let config = shipped_config();
    let goerli = config.resolve_named_accounts("goerli").unwrap();
    assert_eq!(
        goerli.get("deployer"),
        Some(AccountRef::Address(
            "0xA8914C79456eD6d36102A1bed4E471dA2Af4d8d6".parse().unwrap()
        ))
    );
    // No override on mainnet, so the default index applies.
    let mainnet = config.resolve_named_accounts("mainnet").unwrap();
    assert_eq!(mainnet.get("deployer"), Some(AccountRef::Index(1)));
}

#[test]
fn aliases_chase_transitively_under_network_selection() {
    let config = shipped_config();

    let local = config.resolve_named_accounts("local").unwrap();
    // treasury -> sandSaleBeneficiary -> 3
    assert_eq!(local.get("treasury"), Some(AccountRef::Index(3)));
    // catalystAssetFeeRecipient -> treasury -> sandSaleBeneficiary
    assert_eq!(
        local.get("catalystAssetFeeRecipient"),
        local.get("sandSaleBeneficiary")
    );

    let goerli = config.resolve_named_accounts("goerli").unwrap();
    assert_eq!(
        goerli.get("treasury"),
        Some(AccountRef::Address(
            "0xdCD12C5539Ff0f31A2D163aFb6dde4c4acc7e9b4".parse().unwrap()
        ))
    );
    // An alias resolves through the target's own per-network entry.
    assert_eq!(goerli.get("upgradeAdmin"), goerli.get("sandAdmin"));
}

#[test]
fn null_disables_a_role_per_network() {
    let config = shipped_config();
    let mainnet = config.resolve_named_accounts("mainnet").unwrap();
    assert_eq!(mainnet.get("nftCollectionAdmin"), Some(AccountRef::Unassigned));

    let polygon = config.resolve_named_accounts("polygon").unwrap();
    assert_eq!(
        polygon.get("nftCollectionAdmin"),
        Some(AccountRef::Address(
            "0x81Bba87de642Ac2D02F3CA1Db7a05e86e8ab2eDB".parse().unwrap()
        ))
    );
}

#[test]
fn resolution_is_deterministic_and_idempotent() {
    let config = shipped_config();
    for network in ["local", "goerli", "mumbai", "mainnet", "polygon"] {
        let first = config.resolve_named_accounts(network).unwrap();
        let second = config.resolve_named_accounts(network).unwrap();
        assert_eq!(first, second, "re-resolution differs on {}", network);
    }
}

#[test]
fn resolving_an_unknown_network_fails() {
    let config = shipped_config();
    assert!(matches!(
        config.resolve_named_accounts("sepolia").unwrap_err(),
        ConfigFileError::UnknownNetwork(name) if name == "sepolia"
    ));
}

#[test]
fn companion_networks_link_the_layers() {
    let config = shipped_config();
    assert_eq!(
        config.networks.companion("goerli", CompanionSide::L2).unwrap(),
        Some("mumbai")
    );
    assert_eq!(
        config.networks.companion("mumbai", CompanionSide::L1).unwrap(),
        Some("goerli")
    );
    assert_eq!(
        config.networks.companion("mainnet", CompanionSide::L2).unwrap(),
        Some("polygon")
    );
    assert_eq!(
        config.networks.companion("mainnet", CompanionSide::L1).unwrap(),
        None
    );
    // The dev network emulates both layers and links to itself.
    assert_eq!(
        config.networks.companion("local", CompanionSide::L1).unwrap(),
        Some("local")
    );
    assert_eq!(
        config.networks.companion("local", CompanionSide::L2).unwrap(),
        Some("local")
    );
}

#[test]
fn only_the_dev_networks_are_embedded() {
    let config = shipped_config();
    assert!(config.networks.require("local").unwrap().is_embedded());
    for network in ["localhost", "goerli", "mumbai", "mainnet", "polygon"] {
        assert!(
            !config.networks.require(network).unwrap().is_embedded(),
            "{} should target an RPC endpoint",
            network
        );
    }
}

#[test]
fn alias_cycles_abort_validation() {
    let config: Config = serde_json::from_str(
        r#"{
            "named_accounts": {
                "sandAdmin": "upgradeAdmin",
                "upgradeAdmin": "sandAdmin"
            },
            "networks": [ { "network": "local", "tags": ["L1"] } ]
        }"#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    match err {
        ConfigFileError::AliasCycle(path) => assert!(path.contains("->")),
        other => panic!("expected AliasCycle, got {:?}", other),
    }
}

#[test]
fn unknown_alias_targets_abort_validation() {
    let config: Config = serde_json::from_str(
        r#"{
            "named_accounts": { "assetAdmin": "ghostAdmin" },
            "networks": [ { "network": "local", "tags": ["L1"] } ]
        }"#,
    )
    .unwrap();
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigFileError::UnknownAliasTarget { role, target }
            if role == "assetAdmin" && target == "ghostAdmin"
    ));
}
