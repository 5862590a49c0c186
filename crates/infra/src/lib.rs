//! # CardLedger Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The SQLite card repository and database manager
//! - Configuration loading from environment and files
//! - Conversions from storage errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `cardledger-core`
//! - Builds on the pool and validation tiers of `cardledger-common`
//! - Contains all "impure" code (file system, SQLite)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::{DbManager, SqliteCardRepository, SCHEMA_VERSION};
pub use errors::InfraError;

pub use cardledger_common::storage::{HealthStatus, PoolMetrics};
