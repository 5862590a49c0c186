//! HTTP route table

pub mod cards;
pub mod health;
pub mod stats;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::context::AppState;
use crate::utils::logging::log_request;

pub const CARDS_PATH: &str = "/api/cards";
pub const CARD_PATH: &str = "/api/cards/{id}";
pub const STATS_PATH: &str = "/api/stats";
/// Legacy location of the stats endpoint
pub const CARD_STATS_PATH: &str = "/api/cards/stats";
pub const HEALTH_PATH: &str = "/health";

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route(HEALTH_PATH, get(health::health))
        .route(CARDS_PATH, get(cards::list_cards).post(cards::create_card))
        .route(STATS_PATH, get(stats::get_stats))
        .route(CARD_STATS_PATH, get(stats::get_stats))
        .route(
            CARD_PATH,
            get(cards::get_card)
                .put(cards::update_card)
                .patch(cards::update_card)
                .delete(cards::delete_card),
        )
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
