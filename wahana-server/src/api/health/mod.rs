//! Health check API

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
