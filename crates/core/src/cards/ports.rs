//! Port interfaces for card persistence
//!
//! These traits define the boundary between the card services and the
//! storage implementation.

use async_trait::async_trait;
use cardledger_domain::{Card, CardFilter, CardPatch, NewCard, Result};

/// Durable card storage.
///
/// Implementations own identity and timestamps: `create` assigns the id and
/// stamps `created_at == updated_at`, `update` stamps
/// `updated_at = max(now, previous)`.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persist a new card with defaults applied and return it
    async fn create(&self, card: NewCard) -> Result<Card>;

    /// Get a card by ID, `NotFound` when absent
    async fn get_by_id(&self, id: &str) -> Result<Card>;

    /// All cards, newest first (ties broken by id, descending)
    async fn list(&self) -> Result<Vec<Card>>;

    /// Merge `patch` into an existing card atomically
    ///
    /// Never creates a record; `NotFound` when absent.
    async fn update(&self, id: &str, patch: CardPatch) -> Result<Card>;

    /// Remove a card, returning its last stored state
    async fn delete(&self, id: &str) -> Result<Card>;

    /// Number of stored cards matching `filter`
    async fn count(&self, filter: CardFilter) -> Result<u64>;

    /// Evaluate several filters against one consistent read of the store.
    ///
    /// The returned counts are in the same order as `filters`.
    async fn count_snapshot(&self, filters: &[CardFilter]) -> Result<Vec<u64>>;
}
