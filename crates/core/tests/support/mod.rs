//! Shared test helpers for `cardledger-core` integration tests.

pub mod repositories;
