//! Send-status statistics derived from the card store.

pub mod service;

pub use service::StatsService;
