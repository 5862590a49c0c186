use axum::extract::State;
use axum::Json;
use cardledger_domain::CardStats;

use crate::context::AppState;
use crate::error::ApiError;

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<CardStats>, ApiError> {
    Ok(Json(state.stats.get_stats().await?))
}
