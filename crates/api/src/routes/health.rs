//! Discovery and liveness endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardledger_domain::CardLedgerError;
use cardledger_infra::PoolMetrics;
use serde_json::{json, Value};

use crate::context::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Card ledger API is running",
        "endpoints": {
            "GET /api/cards": "List all cards",
            "GET /api/cards/{id}": "Get a card by ID",
            "POST /api/cards": "Create a new card",
            "PUT /api/cards/{id}": "Update a card",
            "PATCH /api/cards/{id}": "Update a card",
            "DELETE /api/cards/{id}": "Delete a card",
            "GET /api/stats": "Get statistics",
            "GET /health": "Database liveness"
        }
    }))
}

/// 200 when the database answers a probe query, 503 otherwise. Both bodies
/// carry the pool counters.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = state.db.clone();
    let probe = tokio::task::spawn_blocking(move || db.health_check())
        .await
        .map_err(|e| CardLedgerError::Internal(format!("Task join error: {e}")))
        .and_then(|result| result);
    let pool = pool_json(&state.db.pool_metrics());

    match probe {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "connections": {
                    "open": status.open_connections,
                    "idle": status.idle_connections,
                    "max": status.max_connections,
                },
                "pool": pool,
            })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": err.to_string(), "pool": pool })),
        ),
    }
}

fn pool_json(metrics: &PoolMetrics) -> Value {
    json!({
        "connectionsAcquired": metrics.connections_acquired,
        "connectionsTimeout": metrics.connections_timeout,
        "connectionsError": metrics.connections_error,
        "avgAcquisitionTimeMs": metrics.avg_acquisition_time_ms,
        "queriesExecuted": metrics.queries_executed,
        "queriesFailed": metrics.queries_failed,
    })
}
