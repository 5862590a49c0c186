//! Card repository implementation using SQLite
//!
//! Ids are UUIDv7 strings; timestamps are stored as epoch milliseconds.
//! Updates and deletes run inside `BEGIN IMMEDIATE` transactions so the
//! read-modify-write on one id cannot interleave with another writer.

use std::sync::Arc;

use async_trait::async_trait;
use cardledger_common::storage::error::StorageError;
use cardledger_core::cards::ports::CardRepository as CardRepositoryPort;
use cardledger_domain::utils::time::{from_millis, now_millis, to_millis};
use cardledger_domain::{
    Card, CardFilter, CardLedgerError, CardPatch, NewCard, Result as DomainResult,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use super::manager::{map_storage_error, DbManager};

const CARD_COLUMNS: &str = "id, recipient_name, address, email, phone_number, card_sent, notes,
                            date_sent, created_at, updated_at";

/// SQLite-backed implementation of `CardRepository`
pub struct SqliteCardRepository {
    db: Arc<DbManager>,
}

impl SqliteCardRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardRepositoryPort for SqliteCardRepository {
    async fn create(&self, card: NewCard) -> DomainResult<Card> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Card> {
            let conn = db.get_connection()?;
            let card = card.into_card(Uuid::now_v7().to_string(), now_millis());

            insert_card(&conn, &card).map_err(map_sql_error)?;
            debug!(card_id = %card.id, "card created");
            Ok(card)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Card> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Card> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
                params![&id],
                map_card_row,
            );

            match result {
                Ok(card) => Ok(card),
                Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => {
                    Err(CardLedgerError::card_not_found(&id))
                }
                Err(err) => Err(map_storage_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self) -> DomainResult<Vec<Card>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Card>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {CARD_COLUMNS} FROM cards ORDER BY created_at DESC, id DESC"
                ))
                .map_err(map_storage_error)?;

            stmt.query_map(&[], map_card_row).map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, id: &str, patch: CardPatch) -> DomainResult<Card> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Card> {
            let mut conn = db.get_connection()?;
            let tx = conn.immediate_transaction().map_err(map_storage_error)?;

            let mut card =
                select_card(&tx, &id)?.ok_or_else(|| CardLedgerError::card_not_found(&id))?;
            patch.apply_to(&mut card, now_millis());
            write_card(&tx, &card).map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            debug!(card_id = %card.id, card_sent = card.card_sent, "card updated");
            Ok(card)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<Card> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Card> {
            let mut conn = db.get_connection()?;
            let tx = conn.immediate_transaction().map_err(map_storage_error)?;

            let card =
                select_card(&tx, &id)?.ok_or_else(|| CardLedgerError::card_not_found(&id))?;
            tx.execute("DELETE FROM cards WHERE id = ?1", params![&id]).map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            debug!(card_id = %card.id, "card deleted");
            Ok(card)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count(&self, filter: CardFilter) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(count_sql(filter), &[], |row| row.get(0))
                .map_err(map_storage_error)?;
            Ok(to_count(count))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count_snapshot(&self, filters: &[CardFilter]) -> DomainResult<Vec<u64>> {
        let db = Arc::clone(&self.db);
        let filters = filters.to_vec();

        task::spawn_blocking(move || -> DomainResult<Vec<u64>> {
            let mut conn = db.get_connection()?;
            // One read transaction: every SELECT sees the same WAL snapshot.
            let tx = conn.transaction().map_err(map_storage_error)?;

            let counts = filters
                .iter()
                .map(|filter| {
                    tx.query_row(count_sql(*filter), [], |row| row.get::<_, i64>(0)).map(to_count)
                })
                .collect::<rusqlite::Result<Vec<u64>>>()
                .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(counts)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn select_card(conn: &Connection, id: &str) -> DomainResult<Option<Card>> {
    conn.query_row(
        &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
        params![id],
        map_card_row,
    )
    .optional()
    .map_err(map_sql_error)
}

fn insert_card(conn: &Connection, card: &Card) -> rusqlite::Result<()> {
    let date_sent = card.date_sent.map(to_millis);
    let params: [&dyn ToSql; 10] = [
        &card.id,
        &card.recipient_name,
        &card.address,
        &card.email,
        &card.phone_number,
        &card.card_sent,
        &card.notes,
        &date_sent,
        &to_millis(card.created_at),
        &to_millis(card.updated_at),
    ];
    conn.execute(
        &format!("INSERT INTO cards ({CARD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
        params.as_slice(),
    )?;
    Ok(())
}

/// Overwrite every mutable column; `id` and `created_at` never change.
fn write_card(conn: &Connection, card: &Card) -> rusqlite::Result<()> {
    let date_sent = card.date_sent.map(to_millis);
    let params: [&dyn ToSql; 9] = [
        &card.recipient_name,
        &card.address,
        &card.email,
        &card.phone_number,
        &card.card_sent,
        &card.notes,
        &date_sent,
        &to_millis(card.updated_at),
        &card.id, // WHERE clause
    ];
    conn.execute(
        "UPDATE cards SET
            recipient_name = ?1, address = ?2, email = ?3, phone_number = ?4,
            card_sent = ?5, notes = ?6, date_sent = ?7, updated_at = ?8
         WHERE id = ?9",
        params.as_slice(),
    )?;
    Ok(())
}

/// Map a row selected with `CARD_COLUMNS` to a Card
fn map_card_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    let date_sent: Option<i64> = row.get(7)?;

    Ok(Card {
        id: row.get(0)?,
        recipient_name: row.get(1)?,
        address: row.get(2)?,
        email: row.get(3)?,
        phone_number: row.get(4)?,
        card_sent: row.get(5)?,
        notes: row.get(6)?,
        date_sent: date_sent.map(|millis| millis_to_datetime(7, millis)).transpose()?,
        created_at: millis_to_datetime(8, row.get(8)?)?,
        updated_at: millis_to_datetime(9, row.get(9)?)?,
    })
}

fn millis_to_datetime(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    from_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Integer,
            format!("timestamp out of range: {millis}").into(),
        )
    })
}

const fn count_sql(filter: CardFilter) -> &'static str {
    match filter {
        CardFilter::All => "SELECT COUNT(*) FROM cards",
        CardFilter::Sent => "SELECT COUNT(*) FROM cards WHERE card_sent = 1",
        CardFilter::Unsent => "SELECT COUNT(*) FROM cards WHERE card_sent = 0",
    }
}

fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> CardLedgerError {
    map_storage_error(StorageError::Rusqlite(err))
}

fn map_join_error(err: task::JoinError) -> CardLedgerError {
    CardLedgerError::Internal(format!("Task join error: {err}"))
}
