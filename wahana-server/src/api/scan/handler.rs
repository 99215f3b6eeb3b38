//! Scan API handlers

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use shared::error::AppResult;

use crate::core::ServerState;
use crate::scan::{self, ScanMode, ScanResult, ScanType};

#[derive(Deserialize)]
pub struct ScanRequest {
    pub code: String,
    pub scan_type: ScanType,
    pub mode: ScanMode,
    #[serde(default)]
    pub gate: Option<String>,
}

/// POST /api/scan
pub async fn scan(
    State(state): State<ServerState>,
    Json(payload): Json<ScanRequest>,
) -> AppResult<Json<ScanResult>> {
    let result = scan::scan(
        &state.pool,
        &payload.code,
        payload.scan_type,
        payload.mode,
        payload.gate.as_deref(),
    )
    .await?;
    Ok(Json(result))
}
