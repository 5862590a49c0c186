//! Conversions from external infrastructure errors into domain errors.

use cardledger_common::storage::StorageError;
use cardledger_domain::CardLedgerError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CardLedgerError);

impl From<InfraError> for CardLedgerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CardLedgerError> for InfraError {
    fn from(value: CardLedgerError) -> Self {
        InfraError(value)
    }
}

trait IntoCardLedgerError {
    fn into_cardledger(self) -> CardLedgerError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CardLedgerError */
/* -------------------------------------------------------------------------- */

impl IntoCardLedgerError for SqlError {
    fn into_cardledger(self) -> CardLedgerError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CardLedgerError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CardLedgerError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        CardLedgerError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 275) => {
                        CardLedgerError::Database("check constraint violation".into())
                    }
                    (ErrorCode::CannotOpen, _) => {
                        CardLedgerError::Database(format!("unable to open database: {message}"))
                    }
                    _ => CardLedgerError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                CardLedgerError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                CardLedgerError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CardLedgerError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                CardLedgerError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidQuery => CardLedgerError::Database("invalid SQL query".into()),
            other => CardLedgerError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_cardledger())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → CardLedgerError */
/* -------------------------------------------------------------------------- */

impl IntoCardLedgerError for StorageError {
    fn into_cardledger(self) -> CardLedgerError {
        match self {
            StorageError::Rusqlite(err) => err.into_cardledger(),
            StorageError::Timeout(secs) => CardLedgerError::Database(format!(
                "timed out after {secs}s waiting for a database connection"
            )),
            StorageError::InvalidConfig(msg) => CardLedgerError::Config(msg),
            StorageError::Migration(msg) => {
                CardLedgerError::Database(format!("Migration error: {msg}"))
            }
            other => CardLedgerError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_cardledger())
    }
}
