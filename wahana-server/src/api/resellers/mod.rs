//! Reseller API

mod handler;

use axum::routing::{get, post, put};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/resellers", post(handler::create))
        .route("/api/resellers/{id}", get(handler::get_by_id))
        .route("/api/resellers/{id}/active", put(handler::set_active))
        .route("/api/resellers/{id}/topup", post(handler::topup))
        .route("/api/resellers/{id}/transactions", get(handler::transactions))
}
