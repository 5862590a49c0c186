//! Application context - dependency injection container

use std::sync::Arc;

use cardledger_core::cards::ports::CardRepository;
use cardledger_core::{CardService, StatsService};
use cardledger_domain::{DatabaseConfig, Result};
use cardledger_infra::{DbManager, SqliteCardRepository};

/// Shared state handed to every HTTP handler
#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<CardService>,
    pub stats: Arc<StatsService>,
    pub db: Arc<DbManager>,
}

impl AppState {
    /// Wire services over an already-migrated database.
    pub fn new(db: Arc<DbManager>) -> Self {
        let repository: Arc<dyn CardRepository> =
            Arc::new(SqliteCardRepository::new(Arc::clone(&db)));

        Self {
            cards: Arc::new(CardService::new(Arc::clone(&repository))),
            stats: Arc::new(StatsService::new(repository)),
            db,
        }
    }

    /// Open the configured database, apply migrations and wire services.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let db = DbManager::from_config(config)?;
        db.run_migrations()?;

        tracing::info!(
            db_path = %db.path().display(),
            schema_version = cardledger_infra::SCHEMA_VERSION,
            "database ready"
        );

        Ok(Self::new(Arc::new(db)))
    }
}
