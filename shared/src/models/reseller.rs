use serde::{Deserialize, Serialize};

/// A reseller account holding a prepaid deposit balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ResellerAccount {
    pub id: i64,
    pub name: String,
    pub agency: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Smallest currency unit; purchase debits never take it negative
    pub deposit_balance: i64,
    /// Millisecond deadline after which the deposit is unusable
    pub deposit_expires_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

impl ResellerAccount {
    /// Whether the deposit has an expiry in the past
    pub fn deposit_expired(&self, now: i64) -> bool {
        matches!(self.deposit_expires_at, Some(deadline) if now > deadline)
    }
}
