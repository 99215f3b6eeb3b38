//! Venue settings repository
//!
//! Singleton row with id fixed at 1, created on first read.

use super::{RepoError, RepoResult};
use shared::models::VenueSettings;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, venue_name, venue_info, payment_timeout_minutes, weekly_closed_days, \
    webhook_token, min_group_order, min_reseller_deposit, min_reseller_deposit_renewal, \
    reseller_deposit_duration_days";

/// Load the settings row, inserting defaults on first use
pub async fn load(pool: &SqlitePool) -> RepoResult<VenueSettings> {
    sqlx::query("INSERT OR IGNORE INTO settings (id) VALUES (1)")
        .execute(pool)
        .await?;

    let row =
        sqlx::query_as::<_, VenueSettings>(&format!("SELECT {COLUMNS} FROM settings WHERE id = 1"))
            .fetch_optional(pool)
            .await?;
    row.ok_or_else(|| RepoError::Database("Settings row missing".into()))
}

pub async fn update(pool: &SqlitePool, settings: &VenueSettings) -> RepoResult<VenueSettings> {
    sqlx::query(
        "UPDATE settings SET venue_name = ?, venue_info = ?, payment_timeout_minutes = ?, \
         weekly_closed_days = ?, webhook_token = ?, min_group_order = ?, \
         min_reseller_deposit = ?, min_reseller_deposit_renewal = ?, \
         reseller_deposit_duration_days = ? WHERE id = 1",
    )
    .bind(&settings.venue_name)
    .bind(&settings.venue_info)
    .bind(settings.payment_timeout_minutes)
    .bind(&settings.weekly_closed_days)
    .bind(&settings.webhook_token)
    .bind(settings.min_group_order)
    .bind(settings.min_reseller_deposit)
    .bind(settings.min_reseller_deposit_renewal)
    .bind(settings.reseller_deposit_duration_days)
    .execute(pool)
    .await?;

    load(pool).await
}
