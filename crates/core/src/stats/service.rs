//! Statistics service
//!
//! Counts are recomputed from the store on every call; nothing is cached.

use std::sync::Arc;

use cardledger_domain::{CardFilter, CardLedgerError, CardStats, Result};

use crate::cards::ports::CardRepository;

const SNAPSHOT_FILTERS: [CardFilter; 2] = [CardFilter::All, CardFilter::Sent];

/// Computes total/sent/remaining from a single store snapshot.
pub struct StatsService {
    repository: Arc<dyn CardRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn CardRepository>) -> Self {
        Self { repository }
    }

    /// Current send-status summary.
    ///
    /// `total` and `sent` come from one snapshot, so
    /// `sent + remaining == total` always holds.
    pub async fn get_stats(&self) -> Result<CardStats> {
        let counts = self.repository.count_snapshot(&SNAPSHOT_FILTERS).await?;

        match counts.as_slice() {
            [total, sent] => Ok(CardStats::from_counts(*total, *sent)),
            other => Err(CardLedgerError::Internal(format!(
                "count snapshot returned {} values for {} filters",
                other.len(),
                SNAPSHOT_FILTERS.len()
            ))),
        }
    }
}
