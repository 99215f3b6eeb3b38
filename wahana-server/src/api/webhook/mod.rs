//! Payment gateway webhook API

mod handler;

use axum::routing::post;
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/webhook/payment", post(handler::payment_callback))
}
