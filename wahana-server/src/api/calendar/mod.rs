//! Calendar API: date probe and override management

mod handler;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/check-date", get(handler::check_date))
        .route("/api/date-overrides", post(handler::create_override))
        .route("/api/date-overrides/{date}", delete(handler::delete_override))
}
