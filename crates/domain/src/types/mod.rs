//! Domain types and models

pub mod card;
pub mod stats;

pub use card::{Card, CardFilter, CardPatch, CardPayload, NewCard};
pub use stats::CardStats;
