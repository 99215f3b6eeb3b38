//! Promo code API handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiscountType, PromoCode};

use crate::core::ServerState;
use crate::db::repository::{promo, RepoError};

#[derive(Deserialize)]
pub struct CheckPromoRequest {
    pub code: String,
    /// Cart subtotal the discount would apply to
    pub total: i64,
}

#[derive(Serialize)]
pub struct CheckPromoResponse {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: i64,
    /// Computed discount for the submitted total, already clamped
    pub discount: i64,
}

/// POST /api/check-promo
pub async fn check_promo(
    State(state): State<ServerState>,
    Json(payload): Json<CheckPromoRequest>,
) -> AppResult<Json<CheckPromoResponse>> {
    let promo = promo::find_active_by_code(&state.pool, &payload.code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PromoNotFound))?;

    let discount = promo.discount_for(payload.total).clamp(0, payload.total);
    Ok(Json(CheckPromoResponse {
        code: promo.code,
        discount_type: promo.discount_type,
        value: promo.value,
        discount,
    }))
}

#[derive(Deserialize)]
pub struct CreatePromoRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: i64,
}

/// POST /api/promos
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreatePromoRequest>,
) -> AppResult<Json<PromoCode>> {
    if payload.code.trim().is_empty() {
        return Err(AppError::validation("Promo code must not be empty"));
    }
    if payload.value <= 0 {
        return Err(AppError::validation("Promo value must be positive"));
    }
    if payload.discount_type == DiscountType::Percent && payload.value > 100 {
        return Err(AppError::validation("Percent discount cannot exceed 100"));
    }

    let created = promo::create(&state.pool, &payload.code, payload.discount_type, payload.value)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::PromoCodeExists),
            other => other.into(),
        })?;
    Ok(Json(created))
}

/// GET /api/promos - admin listing, inactive codes included
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PromoCode>>> {
    let rows = promo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/promos/{id}/active
pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> AppResult<Json<bool>> {
    let updated = promo::set_active(&state.pool, id, payload.is_active).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::PromoNotFound));
    }
    Ok(Json(true))
}
