//! Referral partner repository

use super::{RepoError, RepoResult};
use shared::models::Partner;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, phone, email, fee_percentage, is_active, created_at";

pub async fn find_active_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<Partner>> {
    let row = sqlx::query_as::<_, Partner>(&format!(
        "SELECT {COLUMNS} FROM partner WHERE phone = ? AND is_active = 1"
    ))
    .bind(phone.trim())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Partner>> {
    let row = sqlx::query_as::<_, Partner>(&format!("SELECT {COLUMNS} FROM partner WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    phone: &str,
    email: Option<&str>,
    fee_percentage: i64,
) -> RepoResult<Partner> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO partner (id, name, phone, email, fee_percentage, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(phone.trim())
    .bind(email)
    .bind(fee_percentage)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create partner".into()))
}
