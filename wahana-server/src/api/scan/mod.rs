//! Operator scan API

mod handler;

use axum::routing::post;
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/scan", post(handler::scan))
}
