//! Payload validation for card writes
//!
//! Turns an untrusted JSON body into a [`NewCard`] or [`CardPatch`]. Every
//! failing field is reported, not just the first, and nothing here touches
//! the store.
//!
//! Accepted shapes:
//! - `recipientName`, `address`: non-empty string after trimming
//! - `email`, `phoneNumber`, `notes`: string (trimmed) or `null` to unset;
//!   `email` is lowercased
//! - `cardSent`: boolean
//! - `dateSent`: RFC 3339 string, `YYYY-MM-DD` date (midnight UTC), epoch
//!   milliseconds, or `null`
//!
//! Unknown keys and the store-owned `id`, `createdAt`, `updatedAt` are
//! ignored.

use cardledger_common::validation::{StringValidator, ValidationError, Validator};
use cardledger_domain::constants::{
    FIELD_ADDRESS, FIELD_CARD_SENT, FIELD_DATE_SENT, FIELD_EMAIL, FIELD_NOTES, FIELD_PAYLOAD,
    FIELD_PHONE_NUMBER, FIELD_RECIPIENT_NAME,
};
use cardledger_domain::utils::time::{from_millis, truncate_millis};
use cardledger_domain::{
    CardLedgerError, CardPatch, CardPayload, FieldViolation, NewCard, Result, ValidationFailure,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

const REQUIRED: &str = "is required";
const MUST_BE_STRING: &str = "must be a string";
const MUST_BE_STRING_OR_NULL: &str = "must be a string or null";
const MUST_BE_BOOLEAN: &str = "must be a boolean";
const MUST_BE_TIMESTAMP: &str =
    "must be an RFC 3339 timestamp, a YYYY-MM-DD date, epoch milliseconds, or null";
const MUST_BE_OBJECT: &str = "request body must be a JSON object";

/// Whether a missing required field is an error (create) or means "leave
/// unchanged" (update).
#[derive(Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Validate a create payload.
///
/// # Errors
/// `CardLedgerError::Validation` listing every offending field.
pub fn validate_new_card(payload: &CardPayload) -> Result<NewCard> {
    let fields = object(payload)?;
    let mut validator = Validator::new();

    let recipient_name =
        required_text(&mut validator, fields, FIELD_RECIPIENT_NAME, Presence::Required);
    let address = required_text(&mut validator, fields, FIELD_ADDRESS, Presence::Required);
    let email = optional_text(&mut validator, fields, FIELD_EMAIL, true);
    let phone_number = optional_text(&mut validator, fields, FIELD_PHONE_NUMBER, false);
    let card_sent = boolean(&mut validator, fields, FIELD_CARD_SENT);
    let notes = optional_text(&mut validator, fields, FIELD_NOTES, false);
    let date_sent = timestamp(&mut validator, fields, FIELD_DATE_SENT);

    let card = NewCard {
        recipient_name: recipient_name.unwrap_or_default(),
        address: address.unwrap_or_default(),
        email: email.flatten(),
        phone_number: phone_number.flatten(),
        card_sent,
        notes: notes.flatten(),
        date_sent: date_sent.flatten(),
    };

    validator.finish(card).map_err(to_domain_error)
}

/// Validate an update payload; only the keys present are checked.
///
/// # Errors
/// `CardLedgerError::Validation` listing every offending field.
pub fn validate_card_patch(payload: &CardPayload) -> Result<CardPatch> {
    let fields = object(payload)?;
    let mut validator = Validator::new();

    let patch = CardPatch {
        recipient_name: required_text(
            &mut validator,
            fields,
            FIELD_RECIPIENT_NAME,
            Presence::Optional,
        ),
        address: required_text(&mut validator, fields, FIELD_ADDRESS, Presence::Optional),
        email: optional_text(&mut validator, fields, FIELD_EMAIL, true),
        phone_number: optional_text(&mut validator, fields, FIELD_PHONE_NUMBER, false),
        card_sent: boolean(&mut validator, fields, FIELD_CARD_SENT),
        notes: optional_text(&mut validator, fields, FIELD_NOTES, false),
        date_sent: timestamp(&mut validator, fields, FIELD_DATE_SENT),
    };

    validator.finish(patch).map_err(to_domain_error)
}

// =============================================================================
// Field readers
// =============================================================================

fn object(payload: &CardPayload) -> Result<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| to_domain_error(ValidationError::field(FIELD_PAYLOAD, MUST_BE_OBJECT)))
}

fn required_text(
    validator: &mut Validator,
    fields: &Map<String, Value>,
    key: &str,
    presence: Presence,
) -> Option<String> {
    match fields.get(key) {
        None if presence == Presence::Optional => None,
        None | Some(Value::Null) => {
            validator.add_error(key, REQUIRED);
            None
        }
        Some(Value::String(text)) => validator
            .validate_field(key, text, &StringValidator::new().not_empty())
            .then(|| text.trim().to_string()),
        Some(_) => {
            validator.add_error(key, MUST_BE_STRING);
            None
        }
    }
}

/// `None` when absent, `Some(None)` for an explicit `null`.
fn optional_text(
    validator: &mut Validator,
    fields: &Map<String, Value>,
    key: &str,
    lowercase: bool,
) -> Option<Option<String>> {
    match fields.get(key)? {
        Value::Null => Some(None),
        Value::String(text) => {
            let trimmed = text.trim();
            Some(Some(if lowercase { trimmed.to_lowercase() } else { trimmed.to_string() }))
        }
        _ => {
            validator.add_error(key, MUST_BE_STRING_OR_NULL);
            None
        }
    }
}

fn boolean(validator: &mut Validator, fields: &Map<String, Value>, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(flag) => Some(*flag),
        _ => {
            validator.add_error(key, MUST_BE_BOOLEAN);
            None
        }
    }
}

fn timestamp(
    validator: &mut Validator,
    fields: &Map<String, Value>,
    key: &str,
) -> Option<Option<DateTime<Utc>>> {
    let parsed = match fields.get(key)? {
        Value::Null => return Some(None),
        Value::String(text) => parse_timestamp_text(text.trim()),
        Value::Number(number) => number.as_i64().and_then(from_millis),
        _ => None,
    };

    if parsed.is_none() {
        validator.add_error(key, MUST_BE_TIMESTAMP);
        return None;
    }
    Some(parsed)
}

/// Full RFC 3339 instant, or a bare calendar date taken as midnight UTC.
fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(truncate_millis(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn to_domain_error(err: ValidationError) -> CardLedgerError {
    let violations = err
        .errors
        .into_iter()
        .map(|field_error| FieldViolation::new(field_error.field, field_error.message))
        .collect();
    CardLedgerError::Validation(ValidationFailure { violations })
}
