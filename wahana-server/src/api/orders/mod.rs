//! Order API

mod handler;

use axum::routing::{get, post, put};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders/checkout", post(handler::checkout))
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{code}", get(handler::get_by_code))
        .route("/api/orders/{id}/status", put(handler::set_status))
}
