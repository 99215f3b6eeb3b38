use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Fixed,
    Percent,
}

/// A promotional discount code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCode {
    pub id: i64,
    /// Unique, matched case-insensitively after uppercasing input
    pub code: String,
    pub discount_type: DiscountType,
    /// Fixed amount or percentage depending on `discount_type`
    pub value: i64,
    pub is_active: bool,
    pub created_at: i64,
}

impl PromoCode {
    /// Discount amount for a subtotal, before clamping
    pub fn discount_for(&self, subtotal: i64) -> i64 {
        match self.discount_type {
            DiscountType::Fixed => self.value,
            DiscountType::Percent => subtotal * self.value / 100,
        }
    }
}
