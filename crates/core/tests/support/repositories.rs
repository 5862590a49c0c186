//! Mock repository implementations for testing
//!
//! In-memory `CardRepository` for deterministic service tests without a
//! database.

use async_trait::async_trait;
use cardledger_core::CardRepository;
use cardledger_domain::utils::time::now_millis;
use cardledger_domain::{
    Card, CardFilter, CardLedgerError, CardPatch, NewCard, Result as DomainResult,
};
use parking_lot::Mutex;

#[derive(Default)]
struct State {
    cards: Vec<Card>,
    next_id: u64,
    writes: usize,
    failure: Option<CardLedgerError>,
}

/// In-memory mock for `CardRepository`.
///
/// All operations take one lock, so every call (including
/// `count_snapshot`) sees a consistent state.
#[derive(Default)]
pub struct InMemoryCardRepository {
    state: Mutex<State>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose every call fails with `error`.
    pub fn failing(error: CardLedgerError) -> Self {
        let repo = Self::default();
        repo.state.lock().failure = Some(error);
        repo
    }

    /// Number of successful create/update/delete calls.
    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }

    pub fn len(&self) -> usize {
        self.state.lock().cards.len()
    }

    fn check(state: &State) -> DomainResult<()> {
        match &state.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn create(&self, card: NewCard) -> DomainResult<Card> {
        let mut state = self.state.lock();
        Self::check(&state)?;

        state.next_id += 1;
        let card = card.into_card(format!("card-{:06}", state.next_id), now_millis());
        state.cards.push(card.clone());
        state.writes += 1;
        Ok(card)
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Card> {
        let state = self.state.lock();
        Self::check(&state)?;

        state
            .cards
            .iter()
            .find(|card| card.id == id)
            .cloned()
            .ok_or_else(|| CardLedgerError::card_not_found(id))
    }

    async fn list(&self) -> DomainResult<Vec<Card>> {
        let state = self.state.lock();
        Self::check(&state)?;

        let mut cards = state.cards.clone();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(cards)
    }

    async fn update(&self, id: &str, patch: CardPatch) -> DomainResult<Card> {
        let mut state = self.state.lock();
        Self::check(&state)?;

        let card = state
            .cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or_else(|| CardLedgerError::card_not_found(id))?;
        patch.apply_to(card, now_millis());
        let updated = card.clone();
        state.writes += 1;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DomainResult<Card> {
        let mut state = self.state.lock();
        Self::check(&state)?;

        let index = state
            .cards
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| CardLedgerError::card_not_found(id))?;
        state.writes += 1;
        Ok(state.cards.remove(index))
    }

    async fn count(&self, filter: CardFilter) -> DomainResult<u64> {
        let state = self.state.lock();
        Self::check(&state)?;

        Ok(state.cards.iter().filter(|card| filter.matches(card)).count() as u64)
    }

    async fn count_snapshot(&self, filters: &[CardFilter]) -> DomainResult<Vec<u64>> {
        let state = self.state.lock();
        Self::check(&state)?;

        Ok(filters
            .iter()
            .map(|filter| state.cards.iter().filter(|card| filter.matches(card)).count() as u64)
            .collect())
    }
}
