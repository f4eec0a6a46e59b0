//! Asset Sandbox
//!
//! Deployment role wiring, network profiles and an embedded-chain test
//! harness for an ERC-1155-style asset ecosystem spanning an L1 and an L2
//! network. It includes:
//!
//! - Named-account role tables with per-network overrides and aliasing
//! - Network profiles with tags, deploy bundles and companion-network links
//! - An in-process chain hosting simulated contract state machines
//! - A snapshot-scoped fixture plus meta-transaction dispatch helpers
//!
//! # Module Structure
//!
//! - `config`: Configuration management
//! - `logging`: Logging setup
//! - `models`: Shared data structures, token identifiers and the ABI surface
//! - `chain`: The embedded local chain and its hosted contracts
//! - `harness`: Deploy bundles, contract handles, fixtures and meta-tx dispatch

pub mod chain;
pub mod config;
pub mod harness;
pub mod logging;
pub mod models;
