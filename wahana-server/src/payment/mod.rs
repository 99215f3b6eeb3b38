//! Payment integration: hosted gateway adapter and webhook reconciliation

pub mod gateway;
pub mod reconcile;
