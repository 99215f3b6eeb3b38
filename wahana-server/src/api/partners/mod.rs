//! Referral partner API

mod handler;

use axum::routing::post;
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/partners", post(handler::create))
}
