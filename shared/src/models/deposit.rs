use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DepositType {
    Topup,
    Purchase,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    Pending,
    Completed,
    Failed,
    Expired,
}

/// A signed movement on a reseller's deposit balance
///
/// Top-ups are positive and start pending until the gateway confirms;
/// purchases are negative and complete immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepositTransaction {
    pub id: i64,
    pub reseller_id: i64,
    /// Smallest currency unit, never zero
    pub amount: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "kind"))]
    pub kind: DepositType,
    pub status: DepositStatus,
    /// Gateway correlation key for top-ups, unique when present
    pub external_id: Option<String>,
    pub gateway_invoice_id: Option<String>,
    pub gateway_invoice_url: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
}
