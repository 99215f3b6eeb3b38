use serde::{Deserialize, Serialize};

/// Singleton operational settings aggregate, row id fixed at 1
///
/// Loaded per operation by the orchestration layer and passed into core
/// functions as values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VenueSettings {
    pub id: i64,
    pub venue_name: String,
    pub venue_info: Option<String>,
    /// Minutes before a pending order expires
    pub payment_timeout_minutes: i64,
    /// Comma-separated weekday indices, 0 = Monday
    pub weekly_closed_days: String,
    /// Shared secret for gateway callbacks; callbacks are rejected when unset
    pub webhook_token: Option<String>,
    pub min_group_order: i64,
    pub min_reseller_deposit: i64,
    pub min_reseller_deposit_renewal: i64,
    pub reseller_deposit_duration_days: i64,
}

impl VenueSettings {
    /// Parsed weekly closure days as weekday indices (0 = Monday)
    pub fn closed_weekdays(&self) -> Vec<u32> {
        self.weekly_closed_days
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .filter(|d| *d < 7)
            .collect()
    }

    pub fn payment_timeout_millis(&self) -> i64 {
        self.payment_timeout_minutes * 60_000
    }
}

impl Default for VenueSettings {
    fn default() -> Self {
        Self {
            id: 1,
            venue_name: String::new(),
            venue_info: None,
            payment_timeout_minutes: 60,
            weekly_closed_days: String::new(),
            webhook_token: None,
            min_group_order: 20,
            min_reseller_deposit: 100_000_000,
            min_reseller_deposit_renewal: 50_000_000,
            reseller_deposit_duration_days: 365,
        }
    }
}
