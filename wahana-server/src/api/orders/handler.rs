//! Order API handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CartInput, Order, PaymentMethod, PaymentStatus, Role, VisitType,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::{self, expiry, CheckoutRequest};

#[derive(Deserialize)]
pub struct CheckoutPayload {
    pub visit_date: String,
    pub visit_type: VisitType,
    pub cart: CartInput,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub partner_phone: Option<String>,
    #[serde(default)]
    pub reseller_id: Option<i64>,
}

/// POST /api/orders/checkout
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutPayload>,
) -> AppResult<Json<Order>> {
    let role = if payload.reseller_id.is_some() {
        Role::Reseller
    } else {
        Role::Guest
    };

    let request = CheckoutRequest {
        visit_date: payload.visit_date,
        visit_type: payload.visit_type,
        cart: payload.cart,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        payment_method: payload.payment_method,
        promo_code: payload.promo_code,
        partner_phone: payload.partner_phone,
        reseller_id: payload.reseller_id,
    };

    let created =
        orders::checkout(&state.pool, state.gateway.as_ref(), &state.notify, request, role)
            .await?;
    Ok(Json(created))
}

/// GET /api/orders/{code} - lookup by ticket code or invoice number
///
/// Applies the observe-time expiry check before answering.
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Order>> {
    let found = order::find_by_code_or_invoice(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let found = expiry::expire_if_overdue(&state.pool, &state.notify, found).await?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/orders - admin listing; sweeps overdue pending orders first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    expiry::sweep(&state.pool, &state.notify).await?;
    let rows = order::list_recent(&state.pool, query.limit.clamp(1, 1000)).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: PaymentStatus,
}

/// PUT /api/orders/{id}/status - privileged admin override
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<Order>> {
    let updated =
        orders::admin_set_status(&state.pool, &state.notify, id, payload.status).await?;
    Ok(Json(updated))
}
