//! Partner API handlers

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::Partner;

use crate::core::ServerState;
use crate::db::repository::{partner, RepoError};

#[derive(Deserialize)]
pub struct CreatePartnerRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub fee_percentage: i64,
}

/// POST /api/partners
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreatePartnerRequest>,
) -> AppResult<Json<Partner>> {
    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(AppError::validation("Name and phone are required"));
    }
    if !(0..=100).contains(&payload.fee_percentage) {
        return Err(AppError::validation("Fee percentage must be between 0 and 100"));
    }

    let created = partner::create(
        &state.pool,
        payload.name.trim(),
        &payload.phone,
        payload.email.as_deref(),
        payload.fee_percentage,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::conflict("Partner phone already registered"),
        other => other.into(),
    })?;
    Ok(Json(created))
}
