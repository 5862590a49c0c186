//! Statistics types
//!
//! Aggregate counts derived from stored cards. Nothing here is persisted;
//! every value is recomputed from the store on demand.

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Card Statistics */
/* -------------------------------------------------------------------------- */

/// Send-status summary across all stored cards.
///
/// # Field Invariants
/// - `sent + remaining == total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardStats {
    /// Number of stored cards
    pub total: u64,

    /// Cards with `cardSent == true`
    pub sent: u64,

    /// Cards not yet sent
    pub remaining: u64,
}

impl CardStats {
    /// Build stats from a total and sent count read in the same snapshot.
    pub const fn from_counts(total: u64, sent: u64) -> Self {
        Self { total, sent, remaining: total.saturating_sub(sent) }
    }

    /// Whether the three counts agree with each other.
    pub const fn is_consistent(&self) -> bool {
        self.sent + self.remaining == self.total
    }
}
