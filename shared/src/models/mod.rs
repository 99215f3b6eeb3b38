//! Domain models for the Wahana ticketing engine
//!
//! Plain serde structs shared between the server crate and its tests.
//! Database derives (`sqlx::FromRow` / `sqlx::Type`) are gated behind the
//! `db` feature so non-server consumers stay lightweight.

mod addon;
mod cart;
mod date_override;
mod deposit;
mod fare;
mod order;
mod partner;
mod promo;
mod reseller;
mod settings;
mod ticket;

pub use addon::Addon;
pub use cart::{CartInput, GroupInfo, TicketSelection};
pub use date_override::{DateOverride, OverrideKind};
pub use deposit::{DepositStatus, DepositTransaction, DepositType};
pub use fare::{DateClass, FareClass, Role, Variant};
pub use order::{
    AddonLine, Order, OrderDetails, PartnerSnapshot, PaymentMethod, PaymentStatus, PromoSnapshot,
    TicketLine, VisitType,
};
pub use partner::Partner;
pub use promo::{DiscountType, PromoCode};
pub use reseller::ResellerAccount;
pub use settings::VenueSettings;
pub use ticket::Ticket;
