//! Database connection manager backed by the shared SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cardledger_common::storage::{
    HealthStatus, PoolMetrics, SqliteConnection, SqlitePool, SqlitePoolConfig, StorageError,
};
use cardledger_domain::utils::time::now_millis;
use cardledger_domain::{CardLedgerError, DatabaseConfig, Result};
use rusqlite::params;
use tracing::{info, warn};

use crate::errors::InfraError;

pub const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps a [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Open the database at `db_path` with the given pool size.
    ///
    /// Missing parent directories are created.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_storage_error(StorageError::Io(e)))?;
        }

        let config = SqlitePoolConfig::with_max_size(pool_size.max(1));
        let pool = SqlitePool::new(&path, config).map(Arc::new).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.config().max_size,
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Open the database described by `config`.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size)
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get_connection().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    ///
    /// Idempotent: safe to call on every startup.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Highest applied schema version.
    pub fn schema_version(&self) -> Result<i32> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", &[], |row| {
            row.get(0)
        })
        .map_err(map_storage_error)
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is reachable and answering queries, returning
    /// the pool occupancy on success.
    pub fn health_check(&self) -> Result<HealthStatus> {
        let status = self.pool.health_check();
        if status.healthy {
            return Ok(status);
        }

        let message = status.message.unwrap_or_else(|| "database unavailable".to_string());
        warn!(db_path = %self.path.display(), %message, "database health check failed");
        Err(CardLedgerError::Database(message))
    }

    /// Checkout and query counters accumulated since the pool opened.
    pub fn pool_metrics(&self) -> PoolMetrics {
        self.pool.metrics()
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| map_storage_error(StorageError::Migration(e.to_string())))?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, ?2)",
        params![SCHEMA_VERSION, now_millis().timestamp_millis()],
    )
    .map_err(map_storage_error)?;
    Ok(())
}

pub(crate) fn map_storage_error(err: StorageError) -> CardLedgerError {
    CardLedgerError::from(InfraError::from(err))
}
