//! Storage primitives for SQLite databases
//!
//! This module provides pooled SQLite connections (r2d2 + rusqlite),
//! per-connection pragmas, pool metrics and health reporting.

pub mod error;
pub mod metrics;
pub mod sqlite;
pub mod types;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use metrics::StorageMetrics;
pub use sqlite::{apply_connection_pragmas, SqliteConnection, SqlitePool, SqlitePoolConfig};
pub use types::{HealthStatus, PoolMetrics};
