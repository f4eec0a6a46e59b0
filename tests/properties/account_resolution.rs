//! Property-based tests for named-account resolution.
//!
//! Alias chains of any depth resolve to their terminal value, resolution is
//! idempotent, and every cyclic table is rejected with a cycle error rather
//! than looping.

use asset_sandbox::config::{ConfigFileError, NamedAccountsConfig};
use asset_sandbox::models::AccountRef;
use proptest::{prelude::*, test_runner::Config};
use serde_json::{json, Map, Value};

fn table_from(entries: Map<String, Value>) -> NamedAccountsConfig {
    serde_json::from_value(Value::Object(entries)).unwrap()
}

/// role0 -> role1 -> ... -> roleN -> terminal index
fn linear_chain(depth: usize, terminal: u32) -> NamedAccountsConfig {
    let mut entries = Map::new();
    for position in 0..depth {
        entries.insert(
            format!("role{}", position),
            json!(format!("role{}", position + 1)),
        );
    }
    entries.insert(format!("role{}", depth), json!(terminal));
    table_from(entries)
}

/// role0 -> role1 -> ... -> role(N-1) -> role0
fn cycle(length: usize) -> NamedAccountsConfig {
    let mut entries = Map::new();
    for position in 0..length {
        entries.insert(
            format!("role{}", position),
            json!(format!("role{}", (position + 1) % length)),
        );
    }
    table_from(entries)
}

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  #[test]
  fn prop_alias_chains_resolve_to_their_terminal(
    depth in 0usize..24,
    terminal in 0u32..128,
  ) {
      let accounts = linear_chain(depth, terminal);
      let resolved = accounts.resolve("local").unwrap();
      for position in 0..=depth {
          prop_assert_eq!(
              resolved.get(&format!("role{}", position)),
              Some(AccountRef::Index(terminal))
          );
      }
  }

  #[test]
  fn prop_resolution_is_idempotent(
    depth in 0usize..24,
    terminal in 0u32..128,
    network in "[a-z]{1,12}",
  ) {
      let accounts = linear_chain(depth, terminal);
      prop_assert_eq!(
          accounts.resolve(&network).unwrap(),
          accounts.resolve(&network).unwrap()
      );
  }

  #[test]
  fn prop_every_cycle_is_detected(length in 1usize..16) {
      let accounts = cycle(length);
      let err = accounts.resolve("local").unwrap_err();
      prop_assert!(matches!(err, ConfigFileError::AliasCycle(_)));
  }
}
