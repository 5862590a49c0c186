//! Card CRUD handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cardledger_domain::{Card, CardPayload};
use serde::Serialize;
use serde_json::Value;

use crate::context::AppState;
use crate::error::ApiError;

/// Body returned by `DELETE /api/cards/{id}`
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub card: Card,
}

pub async fn list_cards(State(state): State<AppState>) -> Result<Json<Vec<Card>>, ApiError> {
    Ok(Json(state.cards.list_cards().await?))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    Ok(Json(state.cards.get_card(&id).await?))
}

pub async fn create_card(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let Json(body) = body?;
    let card = state.cards.create_card(&CardPayload::from(body)).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Shared by PUT and PATCH; both merge only the supplied fields.
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let Json(body) = body?;
    Ok(Json(state.cards.update_card(&id, &CardPayload::from(body)).await?))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let card = state.cards.delete_card(&id).await?;
    Ok(Json(DeleteResponse { message: "Card deleted successfully", card }))
}
