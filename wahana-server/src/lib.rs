//! Wahana ticketing server
//!
//! Pricing and order-lifecycle engine for a leisure venue: date
//! classification, role-aware price resolution, cart pricing, discount
//! composition, idempotent order numbering, payment gateway integration,
//! webhook reconciliation, reseller deposits and gate scanning.

pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod payment;
pub mod pricing;
pub mod resellers;
pub mod scan;

pub use crate::core::config::Config;
pub use crate::core::logger::init_logger;
pub use crate::core::state::ServerState;
