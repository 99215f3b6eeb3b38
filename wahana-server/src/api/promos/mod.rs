//! Promo code API

mod handler;

use axum::routing::{post, put};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/check-promo", post(handler::check_promo))
        .route("/api/promos", post(handler::create).get(handler::list))
        .route("/api/promos/{id}/active", put(handler::set_active))
}
