//! Property-based tests.

mod account_resolution;
