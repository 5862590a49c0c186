//! # Cardledger Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for card persistence
//! - Payload validation for create and update requests
//! - The card and statistics services
//!
//! ## Architecture Principles
//! - Only depends on `cardledger-common` and `cardledger-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - No logging side effects; every error propagates to the caller

pub mod cards;
pub mod stats;

// Re-export specific items to avoid ambiguity
pub use cards::ports::CardRepository;
pub use cards::validation::{validate_card_patch, validate_new_card};
pub use cards::CardService;
pub use stats::StatsService;
