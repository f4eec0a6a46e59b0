//! Meta-transaction dispatch.
//!
//! Assembles and submits a trusted-forwarder envelope so a call appears to
//! originate from a user who only supplied a signature. This layer does not
//! implement or verify the signature scheme; acceptance is entirely the
//! forwarder's decision, and a rejected envelope simply does not execute.

use crate::harness::handles::ForwarderHandle;
use crate::harness::HarnessError;
use crate::models::abi::{forward_request_digest, ForwardRequest};
use alloy::primitives::{Address, Bytes};
use alloy::signers::{local::PrivateKeySigner, SignerSync};

/// What the relay reported back. `executed == false` covers every rejection
/// cause (nonce, signature, inner revert) indistinguishably; callers must
/// assert on resulting chain state, not on this flag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTxOutcome {
    pub executed: bool,
}

/// Signs and relays `data` to `to`, claiming `signer`'s address as sender.
/// The envelope is submitted by `relayer`, so the signer pays no gas.
pub async fn send_meta_tx(
    relayer: Address,
    forwarder: &ForwarderHandle,
    to: Address,
    data: Bytes,
    signer: &PrivateKeySigner,
) -> Result<MetaTxOutcome, HarnessError> {
    let from = signer.address();
    let nonce = forwarder.get_nonce(from).await?;
    let req = ForwardRequest {
        from,
        to,
        nonce,
        data,
    };
    let signature = signer.sign_hash_sync(&forward_request_digest(&req))?;
    let executed = forwarder
        .connect(relayer)
        .execute(req, Bytes::from(signature.as_bytes().to_vec()))
        .await?;
    Ok(MetaTxOutcome { executed })
}
