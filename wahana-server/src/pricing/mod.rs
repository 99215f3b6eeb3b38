//! Pricing core
//!
//! Pure functions over catalog values: date classification, unit price
//! resolution, cart expansion and discount composition. Nothing here touches
//! the database; the orchestration layer loads inputs and passes them in.

pub mod calendar;
pub mod cart;
pub mod discount;
pub mod resolver;

pub use calendar::classify;
pub use cart::{price_cart, Catalog, PricedCart};
pub use discount::{apply_discounts, DiscountOutcome, PartnerContext};
pub use resolver::{addon_price, ticket_price};
