//! Promo code repository

use super::{RepoError, RepoResult};
use shared::models::{DiscountType, PromoCode};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, code, discount_type, value, is_active, created_at";

/// Codes are stored and matched uppercase
pub async fn find_active_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<PromoCode>> {
    let row = sqlx::query_as::<_, PromoCode>(&format!(
        "SELECT {COLUMNS} FROM promo WHERE code = ? AND is_active = 1"
    ))
    .bind(code.trim().to_uppercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PromoCode>> {
    let rows = sqlx::query_as::<_, PromoCode>(&format!(
        "SELECT {COLUMNS} FROM promo ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    code: &str,
    discount_type: DiscountType,
    value: i64,
) -> RepoResult<PromoCode> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let code = code.trim().to_uppercase();

    sqlx::query(
        "INSERT INTO promo (id, code, discount_type, value, is_active, created_at) \
         VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(&code)
    .bind(discount_type)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;

    find_active_by_code(pool, &code)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create promo code".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE promo SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
