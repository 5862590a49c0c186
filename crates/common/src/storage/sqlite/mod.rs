//! SQLite connection pooling
//!
//! r2d2-managed rusqlite connections configured with WAL journaling and a
//! busy timeout on every checkout.

pub mod config;
pub mod connection;
pub mod pool;
pub mod pragmas;

pub use config::SqlitePoolConfig;
pub use connection::{SqliteConnection, SqliteStatement};
pub use pool::SqlitePool;
pub use pragmas::apply_connection_pragmas;
