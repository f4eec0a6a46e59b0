//! Data structures shared across configuration, chain and harness layers.

pub mod abi;
pub mod account;
pub mod token_id;

pub use account::{AccountRef, ResolvedAccounts};
pub use token_id::TokenId;
