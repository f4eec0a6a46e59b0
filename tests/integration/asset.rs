//! Integration tests for the simulated AssetERC1155 contract, driven through
//! the snapshot fixture both directly and via meta-transactions.

use alloy::primitives::{Bytes, U256};
use alloy::signers::SignerSync;
use asset_sandbox::config::{load_config, Config};
use asset_sandbox::harness::fixture::{asset_fixture, AssetFixture, SnapshotFixture};
use asset_sandbox::models::abi::{forward_request_digest, ForwardRequest};
use asset_sandbox::models::TokenId;

fn harness_config() -> Config {
    load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config/config.json"))
        .expect("shipped config loads")
}

async fn setup_asset() -> (SnapshotFixture<AssetFixture>, AssetFixture) {
    let config = harness_config();
    let fixture = asset_fixture(&config, "local").await.expect("fixture deploys");
    let entered = fixture.enter().await.expect("fixture enters");
    (fixture, entered)
}

#[tokio::test]
async fn user_sending_asset_to_itself_keeps_the_same_balance() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    f.users[0]
        .asset
        .safe_transfer_from(
            f.users[0].address,
            f.users[0].address,
            token,
            U256::from(10u64),
            Bytes::new(),
        )
        .await
        .unwrap();
    let balance = f.asset.balance_of(f.users[0].address, token).await.unwrap();
    assert_eq!(balance, U256::from(20u64));
}

#[tokio::test]
async fn mint_multiple_reverts_when_ids_and_amounts_length_mismatch() {
    let (_fixture, f) = setup_asset().await;
    let ids = vec![
        TokenId::new(f.minter, 100, 0, 1, false).into(),
        TokenId::new(f.minter, 101, 1, 1, false).into(),
    ];
    let amounts = vec![U256::from(2u64)];
    let err = f
        .asset
        .connect(f.minter)
        .mint_multiple(f.minter, ids, amounts, Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.revert_reason(),
        Some("AssetERC1155: ids and amounts length mismatch")
    );
}

#[tokio::test]
async fn can_transfer_assets() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[1].address, 11).await.unwrap();
    f.users[1]
        .asset
        .safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(10u64),
            Bytes::new(),
        )
        .await
        .unwrap();
    let balance = f.asset.balance_of(f.users[2].address, token).await.unwrap();
    assert_eq!(balance, U256::from(10u64));
}

#[tokio::test]
async fn transfer_conserves_balances_and_total_supply() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[1].address, 11).await.unwrap();
    let supply_before = f.asset.total_supply(token).await.unwrap();

    f.users[1]
        .asset
        .safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(4u64),
            Bytes::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        f.asset.balance_of(f.users[1].address, token).await.unwrap(),
        U256::from(7u64)
    );
    assert_eq!(
        f.asset.balance_of(f.users[2].address, token).await.unwrap(),
        U256::from(4u64)
    );
    assert_eq!(f.asset.total_supply(token).await.unwrap(), supply_before);
}

#[tokio::test]
async fn user_batch_sending_asset_to_itself_keeps_the_same_balance() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    f.users[0]
        .asset
        .safe_batch_transfer_from(
            f.users[0].address,
            f.users[0].address,
            &[token],
            &[U256::from(10u64)],
            Bytes::new(),
        )
        .await
        .unwrap();
    let balance = f.asset.balance_of(f.users[0].address, token).await.unwrap();
    assert_eq!(balance, U256::from(20u64));
}

#[tokio::test]
async fn user_batch_sending_in_series_whose_total_is_more_than_its_balance() {
    // Batch entries settle against the live balance, so a self-transfer
    // series succeeds as long as each single amount fits.
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    f.users[0]
        .asset
        .safe_batch_transfer_from(
            f.users[0].address,
            f.users[0].address,
            &[token, token, token],
            &[U256::from(10u64), U256::from(20u64), U256::from(20u64)],
            Bytes::new(),
        )
        .await
        .unwrap();
    let balance = f.asset.balance_of(f.users[0].address, token).await.unwrap();
    assert_eq!(balance, U256::from(20u64));
}

#[tokio::test]
async fn user_batch_sending_more_asset_than_it_owns_should_fail() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    let err = f.users[0]
        .asset
        .safe_batch_transfer_from(
            f.users[0].address,
            f.users[0].address,
            &[token],
            &[U256::from(30u64)],
            Bytes::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.revert_reason(), Some("BALANCE_TOO_LOW"));
}

#[tokio::test]
async fn batch_exceeding_balance_reverts_atomically() {
    // Cumulative amounts above the pre-call balance must leave no partial
    // application behind.
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    let err = f.users[0]
        .asset
        .safe_batch_transfer_from(
            f.users[0].address,
            f.users[1].address,
            &[token, token],
            &[U256::from(15u64), U256::from(10u64)],
            Bytes::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.revert_reason(), Some("BALANCE_TOO_LOW"));
    assert_eq!(
        f.asset.balance_of(f.users[0].address, token).await.unwrap(),
        U256::from(20u64)
    );
    assert_eq!(
        f.asset.balance_of(f.users[1].address, token).await.unwrap(),
        U256::ZERO
    );
}

#[tokio::test]
async fn can_get_the_chain_index_from_the_token_id() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[1].address, 11).await.unwrap();
    assert_eq!(token.chain_index(), 1);
}

#[tokio::test]
async fn can_get_the_uri_for_an_asset_of_amount_1() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[1].address, 1).await.unwrap();
    let uri = f.asset.token_uri(token).await.unwrap();
    assert_eq!(
        uri,
        "ipfs://bafybeiaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaea/0.json"
    );
}

#[tokio::test]
async fn can_get_the_uri_for_a_ft() {
    let (_fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[1].address, 11).await.unwrap();
    let uri = f.asset.token_uri(token).await.unwrap();
    assert_eq!(
        uri,
        "ipfs://bafybeiaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaea/0.json"
    );
}

#[tokio::test]
async fn fails_to_get_the_uri_for_an_invalid_token_id() {
    let (_fixture, f) = setup_asset().await;
    let token = TokenId::from(U256::from(42u64));
    let err = f.asset.token_uri(token).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("NFT_!EXIST_||_FT_!MINTED"));
}

#[tokio::test]
async fn fixture_entries_are_isolated() {
    let (fixture, f) = setup_asset().await;
    let token = f.mint_asset(f.users[0].address, 20).await.unwrap();
    assert_eq!(
        f.asset.balance_of(f.users[0].address, token).await.unwrap(),
        U256::from(20u64)
    );

    let f = fixture.enter().await.unwrap();
    assert_eq!(
        f.asset.balance_of(f.users[0].address, token).await.unwrap(),
        U256::ZERO
    );
}

mod meta_transactions {
    use super::*;

    #[tokio::test]
    async fn can_transfer_by_meta_tx() {
        let (_fixture, f) = setup_asset().await;
        let token = f.mint_asset(f.users[1].address, 11).await.unwrap();

        let (to, data) = f.asset.populate_safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(10u64),
            Bytes::new(),
        );
        f.send_meta_tx(to, data, f.users[1].address).await.unwrap();

        let balance = f.asset.balance_of(f.users[2].address, token).await.unwrap();
        assert_eq!(balance, U256::from(10u64));
    }

    #[tokio::test]
    async fn fails_to_transfer_someone_elses_token_by_meta_tx() {
        let (_fixture, f) = setup_asset().await;
        let token = f.mint_asset(f.users[1].address, 11).await.unwrap();

        let (to, data) = f.asset.populate_safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(10u64),
            Bytes::new(),
        );
        // users[2] relays a transfer of users[1]'s token under their own
        // name; the forwarder accepts the envelope but the transfer silently
        // does not happen.
        f.send_meta_tx(to, data, f.users[2].address).await.unwrap();

        let balance = f.asset.balance_of(f.users[2].address, token).await.unwrap();
        assert_eq!(balance, U256::ZERO);
    }

    #[tokio::test]
    async fn can_batch_transfer_by_meta_tx() {
        let (_fixture, f) = setup_asset().await;
        let token1 = f.mint_asset(f.users[1].address, 7).await.unwrap();
        let token2 = f.mint_asset(f.users[1].address, 3).await.unwrap();

        let (to, data) = f.asset.populate_safe_batch_transfer_from(
            f.users[1].address,
            f.users[2].address,
            &[token1, token2],
            &[U256::from(7u64), U256::from(3u64)],
            Bytes::new(),
        );
        f.send_meta_tx(to, data, f.users[1].address).await.unwrap();

        let received = f
            .asset
            .balance_of_batch(
                vec![f.users[2].address, f.users[2].address],
                &[token1, token2],
            )
            .await
            .unwrap();
        assert_eq!(received, vec![U256::from(7u64), U256::from(3u64)]);

        let remaining = f
            .asset
            .balance_of_batch(
                vec![f.users[1].address, f.users[1].address],
                &[token1, token2],
            )
            .await
            .unwrap();
        assert_eq!(remaining, vec![U256::ZERO, U256::ZERO]);
    }

    #[tokio::test]
    async fn forged_signature_does_not_execute() {
        let (_fixture, f) = setup_asset().await;
        let token = f.mint_asset(f.users[1].address, 11).await.unwrap();

        let (to, data) = f.asset.populate_safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(10u64),
            Bytes::new(),
        );

        // Claim users[1] as sender but sign with users[2]'s key.
        let req = ForwardRequest {
            from: f.users[1].address,
            to,
            nonce: f
                .trusted_forwarder
                .get_nonce(f.users[1].address)
                .await
                .unwrap(),
            data,
        };
        let forger = f.chain.signer_for(f.users[2].address).unwrap();
        let signature = forger
            .sign_hash_sync(&forward_request_digest(&req))
            .unwrap();

        let executed = f
            .trusted_forwarder
            .execute(req, Bytes::from(signature.as_bytes().to_vec()))
            .await
            .unwrap();
        assert!(!executed);
        assert_eq!(
            f.asset.balance_of(f.users[2].address, token).await.unwrap(),
            U256::ZERO
        );
        assert_eq!(
            f.asset.balance_of(f.users[1].address, token).await.unwrap(),
            U256::from(11u64)
        );
    }

    #[tokio::test]
    async fn envelope_cannot_be_replayed() {
        let (_fixture, f) = setup_asset().await;
        let token = f.mint_asset(f.users[1].address, 20).await.unwrap();

        let (to, data) = f.asset.populate_safe_transfer_from(
            f.users[1].address,
            f.users[2].address,
            token,
            U256::from(5u64),
            Bytes::new(),
        );
        let req = ForwardRequest {
            from: f.users[1].address,
            to,
            nonce: f
                .trusted_forwarder
                .get_nonce(f.users[1].address)
                .await
                .unwrap(),
            data,
        };
        let signer = f.chain.signer_for(f.users[1].address).unwrap();
        let signature = signer
            .sign_hash_sync(&forward_request_digest(&req))
            .unwrap();
        let signature = Bytes::from(signature.as_bytes().to_vec());

        let first = f
            .trusted_forwarder
            .execute(req.clone(), signature.clone())
            .await
            .unwrap();
        assert!(first);

        // The nonce moved, so the identical envelope is silently rejected.
        let second = f.trusted_forwarder.execute(req, signature).await.unwrap();
        assert!(!second);
        assert_eq!(
            f.asset.balance_of(f.users[2].address, token).await.unwrap(),
            U256::from(5u64)
        );
    }
}
