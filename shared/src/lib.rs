//! Shared types for the Wahana ticketing engine
//!
//! Domain models, the unified error system, and small utilities used by
//! both the server crate and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
