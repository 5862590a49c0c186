//! Pure helper functions shared across crates

pub mod time;
