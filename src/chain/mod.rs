//! Embedded local chain.
//!
//! `LocalChain` is the in-process execution substrate the harness drives in
//! the simulated case: a set of deterministic dev signers, a registry of
//! deployed contract state machines, and snapshot/restore over the whole
//! contract state. All mutation goes through submitted transactions; a revert
//! rolls the transaction's state changes back atomically and surfaces the
//! contract's reason string.
//!
//! Execution is sequential behind a single async mutex, so transactions are
//! applied in submission order. Every entry point is async: in the simulated
//! case the suspension is only the mutex, but callers are written against the
//! same suspending-call model a remote chain would impose.

pub mod contracts;
pub mod error;
pub mod signers;

pub use error::ChainError;
pub use signers::SignerSet;

use crate::models::account::AccountRef;
use alloy::primitives::{keccak256, Address, Bytes};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(test)]
use mockall::automock;

/// Identity of an in-flight call as seen by the target contract.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    /// The direct caller: a local account for top-level transactions, or the
    /// calling contract's address for nested calls.
    pub sender: Address,
    /// The address the call targets.
    pub contract: Address,
}

/// A deployed contract state machine.
///
/// `execute` may mutate state and call into other contracts through [`Env`];
/// `view` is read-only. Implementations signal business-rule violations with
/// [`ChainError::Revert`]; the chain rolls back the transaction's mutations.
pub trait Contract: Send + Sync {
    fn execute(
        &mut self,
        env: &mut Env<'_>,
        ctx: &CallContext,
        data: &[u8],
    ) -> Result<Bytes, ChainError>;

    fn view(&self, ctx: &CallContext, data: &[u8]) -> Result<Bytes, ChainError>;

    fn clone_box(&self) -> Box<dyn Contract>;
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Execution environment handed to a contract for the duration of one call.
pub struct Env<'a> {
    state: &'a mut ChainState,
}

impl Env<'_> {
    /// Calls another contract. The callee's mutations are rolled back if it
    /// fails, without undoing the caller's own state changes, so a caller may
    /// observe and swallow a callee's revert.
    pub fn call_contract(
        &mut self,
        sender: Address,
        to: Address,
        data: &[u8],
    ) -> Result<Bytes, ChainError> {
        let checkpoint = self.state.clone();
        match dispatch(self.state, sender, to, data) {
            Ok(output) => Ok(output),
            Err(err) => {
                *self.state = checkpoint;
                Err(err)
            }
        }
    }
}

#[derive(Clone, Default)]
struct ChainState {
    contracts: HashMap<Address, Box<dyn Contract>>,
    deployments: HashMap<String, Address>,
}

struct ChainInner {
    state: ChainState,
    snapshots: HashMap<u64, ChainState>,
    next_snapshot_id: u64,
}

/// Runs a call against the target contract. The contract is taken out of the
/// state for the duration of the call so it can re-enter the chain through
/// [`Env`] without aliasing its own state.
fn dispatch(
    state: &mut ChainState,
    sender: Address,
    to: Address,
    data: &[u8],
) -> Result<Bytes, ChainError> {
    let mut contract = state
        .contracts
        .remove(&to)
        .ok_or(ChainError::UnknownContract(to))?;
    let ctx = CallContext {
        sender,
        contract: to,
    };
    let result = contract.execute(&mut Env { state: &mut *state }, &ctx, data);
    state.contracts.insert(to, contract);
    result
}

/// Handle to a captured chain state. Snapshots are reusable: restoring does
/// not consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(u64);

/// Cloneable handle to the embedded chain.
#[derive(Clone)]
pub struct LocalChain {
    inner: Arc<Mutex<ChainInner>>,
    signers: Arc<SignerSet>,
}

impl LocalChain {
    /// Creates a chain with `accounts` deterministic dev signers.
    pub fn new(accounts: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChainInner {
                state: ChainState::default(),
                snapshots: HashMap::new(),
                next_snapshot_id: 0,
            })),
            signers: Arc::new(SignerSet::dev(accounts)),
        }
    }

    /// Addresses of the local accounts, in derivation order.
    pub fn accounts(&self) -> Vec<Address> {
        self.signers.addresses()
    }

    pub fn signer(&self, index: u32) -> Result<&PrivateKeySigner, ChainError> {
        self.signers.by_index(index)
    }

    pub fn signer_for(&self, address: Address) -> Result<&PrivateKeySigner, ChainError> {
        self.signers.by_address(address)
    }

    /// Turns a resolved account reference into a concrete address. Index
    /// references are looked up in the local signer set; unassigned roles are
    /// an error here. Callers that can tolerate a disabled role must check
    /// [`AccountRef::is_assigned`] first.
    pub fn account_for(&self, reference: &AccountRef) -> Result<Address, ChainError> {
        match reference {
            AccountRef::Address(address) => Ok(*address),
            AccountRef::Index(index) => Ok(self.signers.by_index(*index)?.address()),
            AccountRef::Unassigned => Err(ChainError::UnassignedAccount),
        }
    }

    /// Deploys a contract under a name. The address is derived from the name,
    /// so deployments land on the same address on every run.
    pub async fn deploy(
        &self,
        name: &str,
        contract: Box<dyn Contract>,
    ) -> Result<Address, ChainError> {
        let mut inner = self.inner.lock().await;
        if inner.state.deployments.contains_key(name) {
            return Err(ChainError::DeploymentExists(name.to_string()));
        }
        let address = deterministic_address(name);
        inner.state.deployments.insert(name.to_string(), address);
        inner.state.contracts.insert(address, contract);
        Ok(address)
    }

    /// Looks up the address of a named deployment.
    pub async fn deployment(&self, name: &str) -> Result<Address, ChainError> {
        let inner = self.inner.lock().await;
        inner
            .state
            .deployments
            .get(name)
            .copied()
            .ok_or_else(|| ChainError::UnknownDeployment(name.to_string()))
    }

    /// Captures the full contract and deployment state.
    pub async fn snapshot(&self) -> SnapshotId {
        let mut inner = self.inner.lock().await;
        let id = inner.next_snapshot_id;
        inner.next_snapshot_id += 1;
        let state = inner.state.clone();
        inner.snapshots.insert(id, state);
        SnapshotId(id)
    }

    /// Restores a previously captured state. The snapshot stays available for
    /// further restores.
    pub async fn revert_to(&self, snapshot: SnapshotId) -> Result<(), ChainError> {
        let mut inner = self.inner.lock().await;
        let state = inner
            .snapshots
            .get(&snapshot.0)
            .cloned()
            .ok_or(ChainError::UnknownSnapshot(snapshot.0))?;
        inner.state = state;
        Ok(())
    }
}

/// Asynchronous call surface of a chain, real or embedded.
///
/// `execute` submits a state-changing transaction from a local account;
/// `call` performs a read-only query. Outputs are ABI-encoded bytes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainHandle: Send + Sync {
    async fn execute(&self, from: Address, to: Address, data: Bytes) -> Result<Bytes, ChainError>;

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;
}

#[async_trait]
impl ChainHandle for LocalChain {
    async fn execute(&self, from: Address, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        // A transaction must be signable by a local account.
        if !self.signers.contains(from) {
            return Err(ChainError::NoLocalSigner(from));
        }
        let mut inner = self.inner.lock().await;
        let checkpoint = inner.state.clone();
        match dispatch(&mut inner.state, from, to, &data) {
            Ok(output) => Ok(output),
            Err(err) => {
                inner.state = checkpoint;
                Err(err)
            }
        }
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let inner = self.inner.lock().await;
        let contract = inner
            .state
            .contracts
            .get(&to)
            .ok_or(ChainError::UnknownContract(to))?;
        let ctx = CallContext {
            sender: Address::ZERO,
            contract: to,
        };
        contract.view(&ctx, &data)
    }
}

fn deterministic_address(name: &str) -> Address {
    Address::from_slice(&keccak256(name.as_bytes())[12..])
}
