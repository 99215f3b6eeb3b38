//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`calendar`] - date classification probe and date overrides
//! - [`promos`] - promo validation and management
//! - [`partners`] - referral partner management
//! - [`orders`] - checkout, lookup and admin status control
//! - [`webhook`] - payment gateway callbacks
//! - [`scan`] - operator wristband/gate scanning
//! - [`resellers`] - onboarding, account view and deposit top-ups

pub mod calendar;
pub mod health;
pub mod orders;
pub mod partners;
pub mod promos;
pub mod resellers;
pub mod scan;
pub mod webhook;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(calendar::router())
        .merge(promos::router())
        .merge(partners::router())
        .merge(orders::router())
        .merge(webhook::router())
        .merge(scan::router())
        .merge(resellers::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
