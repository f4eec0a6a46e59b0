//! Simulated trusted forwarder.
//!
//! Verifies a meta-transaction envelope's nonce and signature, then relays
//! the inner call with the claimed sender appended to calldata (ERC-2771).
//! Rejection is silent: a bad nonce, a malformed signature, a signer other
//! than the claimed sender, or an inner revert all leave the target state
//! unchanged and surface only as a `false` return value. Callers must assert
//! on resulting state, never on the dispatch result alone.

use crate::chain::{CallContext, ChainError, Contract, Env};
use crate::models::abi::{forward_request_digest, ForwardRequest, IForwarder::IForwarderCalls};
use alloy::primitives::{Address, Bytes, Signature, U256};
use alloy::sol_types::{SolInterface, SolValue};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct TrustedForwarder {
    nonces: HashMap<Address, U256>,
}

impl TrustedForwarder {
    fn nonce(&self, from: Address) -> U256 {
        self.nonces.get(&from).copied().unwrap_or_default()
    }

    /// Verifies and relays one envelope. Returns whether the inner call ran
    /// to completion. The nonce is consumed as soon as the envelope verifies,
    /// so a replayed envelope is rejected even if the inner call reverted.
    fn process(&mut self, env: &mut Env<'_>, ctx: &CallContext, req: &ForwardRequest, signature: &[u8]) -> bool {
        if req.nonce != self.nonce(req.from) {
            return false;
        }
        let Ok(signature) = Signature::try_from(signature) else {
            return false;
        };
        let digest = forward_request_digest(req);
        let Ok(recovered) = signature.recover_address_from_prehash(&digest) else {
            return false;
        };
        if recovered != req.from {
            return false;
        }
        self.nonces.insert(req.from, req.nonce + U256::from(1u8));

        let mut data = req.data.to_vec();
        data.extend_from_slice(req.from.as_slice());
        env.call_contract(ctx.contract, req.to, &data).is_ok()
    }
}

impl Contract for TrustedForwarder {
    fn execute(
        &mut self,
        env: &mut Env<'_>,
        ctx: &CallContext,
        data: &[u8],
    ) -> Result<Bytes, ChainError> {
        match IForwarderCalls::abi_decode(data)? {
            IForwarderCalls::execute(call) => {
                let executed = self.process(env, ctx, &call.req, &call.signature);
                Ok(executed.abi_encode().into())
            }
            IForwarderCalls::getNonce(call) => Ok(self.nonce(call.from).abi_encode().into()),
        }
    }

    fn view(&self, _ctx: &CallContext, data: &[u8]) -> Result<Bytes, ChainError> {
        match IForwarderCalls::abi_decode(data)? {
            IForwarderCalls::getNonce(call) => Ok(self.nonce(call.from).abi_encode().into()),
            IForwarderCalls::execute(_) => Err(ChainError::revert("CALL_NOT_VIEW")),
        }
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }
}
