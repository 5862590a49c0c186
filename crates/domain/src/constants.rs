//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Configuration defaults
pub const DEFAULT_DB_PATH: &str = "cards.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Payload keys as sent by clients
pub const FIELD_RECIPIENT_NAME: &str = "recipientName";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE_NUMBER: &str = "phoneNumber";
pub const FIELD_CARD_SENT: &str = "cardSent";
pub const FIELD_NOTES: &str = "notes";
pub const FIELD_DATE_SENT: &str = "dateSent";

/// Pseudo-field reported when the payload itself is malformed
pub const FIELD_PAYLOAD: &str = "_payload";
