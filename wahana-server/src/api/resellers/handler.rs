//! Reseller API handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{DepositTransaction, ResellerAccount};

use crate::core::ServerState;
use crate::db::repository::deposit;
use crate::resellers;

#[derive(Deserialize)]
pub struct CreateResellerRequest {
    pub name: String,
    pub agency: String,
    pub email: String,
    pub phone: String,
}

/// POST /api/resellers - onboarding with a generated temporary password
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateResellerRequest>,
) -> AppResult<Json<ResellerAccount>> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::validation("Name and email are required"));
    }

    let account = resellers::onboard(
        &state.pool,
        &state.notify,
        payload.name.trim(),
        payload.agency.trim(),
        payload.email.trim(),
        payload.phone.trim(),
    )
    .await?;
    Ok(Json(account))
}

#[derive(Serialize)]
pub struct ResellerView {
    #[serde(flatten)]
    pub account: ResellerAccount,
    /// Evaluated as of the read, not stored
    pub deposit_expired: bool,
}

/// GET /api/resellers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ResellerView>> {
    let (account, deposit_expired) = resellers::get_account(&state.pool, id).await?;
    Ok(Json(ResellerView {
        account,
        deposit_expired,
    }))
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/resellers/{id}/active - admin enable/disable
pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> AppResult<Json<bool>> {
    resellers::set_active(&state.pool, id, payload.is_active).await?;
    Ok(Json(true))
}

#[derive(Deserialize)]
pub struct TopupRequest {
    pub amount: i64,
}

/// POST /api/resellers/{id}/topup
pub async fn topup(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TopupRequest>,
) -> AppResult<Json<DepositTransaction>> {
    let tx = resellers::topup(&state.pool, state.gateway.as_ref(), id, payload.amount).await?;
    Ok(Json(tx))
}

/// GET /api/resellers/{id}/transactions
pub async fn transactions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DepositTransaction>>> {
    // existence check keeps 404 semantics for unknown accounts
    resellers::get_account(&state.pool, id).await?;
    let rows = deposit::find_by_reseller(&state.pool, id).await?;
    Ok(Json(rows))
}
