//! # CardLedger HTTP API
//!
//! axum surface over the card and statistics services.

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

pub use context::AppState;
pub use error::ApiError;
pub use routes::router;
