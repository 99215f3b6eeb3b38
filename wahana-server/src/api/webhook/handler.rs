//! Webhook handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::error::AppResult;

use crate::core::ServerState;
use crate::payment::reconcile;

#[derive(Deserialize)]
pub struct CallbackPayload {
    pub external_id: String,
    pub status: String,
}

/// POST /api/webhook/payment
///
/// Token arrives in the `x-callback-token` header; the body carries the
/// gateway's external id and reported status.
pub async fn payment_callback(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<CallbackPayload>,
) -> AppResult<Json<Value>> {
    let token = headers
        .get("x-callback-token")
        .and_then(|v| v.to_str().ok());

    reconcile::handle_webhook(
        &state.pool,
        &state.notify,
        token,
        &payload.external_id,
        &payload.status,
    )
    .await?;

    Ok(Json(json!({ "status": "success" })))
}
