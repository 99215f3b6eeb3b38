use serde::{Deserialize, Serialize};

/// A referral partner earning a percentage fee on group purchases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Partner {
    pub id: i64,
    pub name: String,
    /// Unique, used as the lookup key at checkout
    pub phone: String,
    pub email: Option<String>,
    /// Whole-number percentage applied to group-category lines
    pub fee_percentage: i64,
    pub is_active: bool,
    pub created_at: i64,
}
