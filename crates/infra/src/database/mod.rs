//! Database implementations

pub mod card_repository;
pub mod manager;

pub use card_repository::*;
pub use manager::*;
