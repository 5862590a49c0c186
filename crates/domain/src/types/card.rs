//! Card records and the write models that create and change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A greeting card recipient tracked for send status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Store-assigned identifier, immutable
    pub id: String,
    pub recipient_name: String,
    pub address: String,
    /// Lowercased and trimmed
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub card_sent: bool,
    pub notes: Option<String>,
    /// Caller-supplied; never derived from `card_sent`
    #[serde(default, with = "crate::utils::time::option_rfc3339_millis")]
    pub date_sent: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::time::rfc3339_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::time::rfc3339_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a card.
///
/// Fields left as `None` receive the store defaults (`card_sent = false`,
/// optional text unset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    pub recipient_name: String,
    pub address: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub card_sent: Option<bool>,
    pub notes: Option<String>,
    pub date_sent: Option<DateTime<Utc>>,
}

impl NewCard {
    /// Create input with only the required fields set.
    pub fn new(recipient_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { recipient_name: recipient_name.into(), address: address.into(), ..Self::default() }
    }

    /// Materialise the stored record with defaults applied.
    pub fn into_card(self, id: String, now: DateTime<Utc>) -> Card {
        Card {
            id,
            recipient_name: self.recipient_name,
            address: self.address,
            email: self.email,
            phone_number: self.phone_number,
            card_sent: self.card_sent.unwrap_or(false),
            notes: self.notes,
            date_sent: self.date_sent,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated partial update.
///
/// An outer `None` leaves the stored field untouched. For nullable fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub recipient_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub card_sent: Option<bool>,
    pub notes: Option<Option<String>>,
    pub date_sent: Option<Option<DateTime<Utc>>>,
}

impl CardPatch {
    /// True when no field would change.
    pub const fn is_empty(&self) -> bool {
        self.recipient_name.is_none()
            && self.address.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.card_sent.is_none()
            && self.notes.is_none()
            && self.date_sent.is_none()
    }

    /// Patch that only flips the send status.
    pub fn mark_sent(card_sent: bool) -> Self {
        Self { card_sent: Some(card_sent), ..Self::default() }
    }

    /// Merge the supplied fields into `card` and stamp `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply_to(self, card: &mut Card, now: DateTime<Utc>) {
        if let Some(recipient_name) = self.recipient_name {
            card.recipient_name = recipient_name;
        }
        if let Some(address) = self.address {
            card.address = address;
        }
        if let Some(email) = self.email {
            card.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            card.phone_number = phone_number;
        }
        if let Some(card_sent) = self.card_sent {
            card.card_sent = card_sent;
        }
        if let Some(notes) = self.notes {
            card.notes = notes;
        }
        if let Some(date_sent) = self.date_sent {
            card.date_sent = date_sent;
        }
        card.updated_at = now.max(card.updated_at);
    }
}

/// Predicate evaluated by the store when counting cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFilter {
    All,
    Sent,
    Unsent,
}

impl CardFilter {
    /// Evaluate the predicate against a single record.
    pub const fn matches(self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Sent => card.card_sent,
            Self::Unsent => !card.card_sent,
        }
    }
}

/// Raw, untrusted request body for create and update operations.
///
/// Only the validation layer turns this into [`NewCard`] or [`CardPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardPayload(pub Value);

impl CardPayload {
    /// Borrow the payload as a JSON object, if it is one.
    pub fn as_object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.0.as_object()
    }
}

impl From<Value> for CardPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
