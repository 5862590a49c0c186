//! Error types used throughout the application

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rejected payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Payload key (camelCase, as sent by the caller)
    pub field: String,
    /// Human readable reason
    pub reason: String,
}

impl FieldViolation {
    /// Create a new violation for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every field a rejected payload failed on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Failure with a single violation.
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { violations: vec![FieldViolation::new(field, reason)] }
    }

    /// Whether `field` is among the violations.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Main error type for Cardledger
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CardLedgerError {
    /// Payload rejected before reaching the store.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage medium unreachable or the write was rejected.
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardLedgerError {
    /// Not-found error for a card id.
    pub fn card_not_found(id: &str) -> Self {
        Self::NotFound(format!("card {id}"))
    }

    /// Whether this is a not-found error.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Borrow the validation details, if this is a validation error.
    pub const fn validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for CardLedgerError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

/// Result type alias for Cardledger operations
pub type Result<T> = std::result::Result<T, CardLedgerError>;
