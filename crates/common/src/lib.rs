//! Modular common utilities shared across Cardledger crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field validation primitives
//! - `platform`: pooled SQLite storage with pragmas, metrics and health checks

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod storage;

// Re-export commonly used types for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use storage::{HealthStatus, PoolMetrics, SqlitePool, SqlitePoolConfig, StorageError, StorageResult};
#[cfg(feature = "foundation")]
pub use validation::{FieldError, ValidationError, ValidationResult};
