//! Calendar API handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DateClass, FareClass, OverrideKind, Role, Variant};

use crate::core::ServerState;
use crate::db::repository::{catalog, settings, RepoError};
use crate::pricing;

#[derive(Deserialize)]
pub struct CheckDateQuery {
    pub date: String,
}

#[derive(Serialize)]
pub struct TicketPrices {
    pub slug: String,
    pub name: String,
    pub adult: i64,
    pub child: i64,
    pub general: i64,
}

#[derive(Serialize)]
pub struct CheckDateResponse {
    pub date: String,
    pub status: DateClass,
    /// Resolved guest prices per ticket; empty when the venue is closed
    pub tickets: Vec<TicketPrices>,
}

/// GET /api/check-date?date=YYYY-MM-DD
pub async fn check_date(
    State(state): State<ServerState>,
    Query(query): Query<CheckDateQuery>,
) -> AppResult<Json<CheckDateResponse>> {
    let date: NaiveDate = query
        .date
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid date: {}", query.date)))?;

    let cfg = settings::load(&state.pool).await?;
    let override_kind = catalog::find_override(&state.pool, &query.date)
        .await?
        .map(|o| o.kind);
    let status = pricing::classify(date, override_kind, &cfg.closed_weekdays());

    let tickets = match status.fare_class() {
        Some(fare_class) => resolve_prices(&state, fare_class).await?,
        None => Vec::new(),
    };

    Ok(Json(CheckDateResponse {
        date: query.date,
        status,
        tickets,
    }))
}

async fn resolve_prices(
    state: &ServerState,
    fare_class: FareClass,
) -> AppResult<Vec<TicketPrices>> {
    let tickets = catalog::find_active_tickets(&state.pool).await?;
    Ok(tickets
        .into_iter()
        .map(|t| TicketPrices {
            adult: pricing::ticket_price(&t, fare_class, Variant::Adult, Role::Guest),
            child: pricing::ticket_price(&t, fare_class, Variant::Child, Role::Guest),
            general: pricing::ticket_price(&t, fare_class, Variant::General, Role::Guest),
            slug: t.slug,
            name: t.name,
        })
        .collect())
}

#[derive(Deserialize)]
pub struct CreateOverrideRequest {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: OverrideKind,
    pub note: Option<String>,
}

/// POST /api/date-overrides
pub async fn create_override(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOverrideRequest>,
) -> AppResult<Json<shared::models::DateOverride>> {
    let _: NaiveDate = payload
        .date
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid date: {}", payload.date)))?;

    let created =
        catalog::create_override(&state.pool, &payload.date, payload.kind, payload.note.as_deref())
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::new(ErrorCode::DateOverrideExists),
                other => other.into(),
            })?;
    Ok(Json(created))
}

/// DELETE /api/date-overrides/{date}
pub async fn delete_override(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = catalog::delete_override(&state.pool, &date).await?;
    Ok(Json(deleted))
}
