//! Card service - the single entry point for card lifecycle operations

use std::sync::Arc;

use cardledger_domain::{Card, CardPayload, Result};

use super::ports::CardRepository;
use super::validation::{validate_card_patch, validate_new_card};

/// Validates payloads and delegates persistence to a [`CardRepository`].
///
/// Holds no card state between calls.
pub struct CardService {
    repository: Arc<dyn CardRepository>,
}

impl CardService {
    /// Create a new card service
    pub fn new(repository: Arc<dyn CardRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a new card.
    ///
    /// A rejected payload never reaches the repository.
    pub async fn create_card(&self, payload: &CardPayload) -> Result<Card> {
        let new_card = validate_new_card(payload)?;
        self.repository.create(new_card).await
    }

    pub async fn get_card(&self, id: &str) -> Result<Card> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_cards(&self) -> Result<Vec<Card>> {
        self.repository.list().await
    }

    /// Apply the fields present in `payload` to an existing card.
    ///
    /// An empty payload still refreshes `updated_at`. Never creates a card.
    pub async fn update_card(&self, id: &str, payload: &CardPayload) -> Result<Card> {
        let patch = validate_card_patch(payload)?;
        self.repository.update(id, patch).await
    }

    /// Delete a card and return its final state
    pub async fn delete_card(&self, id: &str) -> Result<Card> {
        self.repository.delete(id).await
    }
}
