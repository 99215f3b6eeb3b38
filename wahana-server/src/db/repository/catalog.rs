//! Ticket, addon and date-override repository

use super::{RepoError, RepoResult};
use shared::models::{Addon, DateOverride, OverrideKind, Ticket};
use sqlx::SqlitePool;

const TICKET_COLUMNS: &str = "id, name, description, slug, category, is_active, \
    price_adult, price_child, price_general, \
    price_weekend_adult, price_weekend_child, price_weekend_general, \
    price_highseason_adult, price_highseason_child, price_highseason_general, \
    price_reseller_adult, price_reseller_child, price_reseller_general";

pub async fn find_active_tickets(pool: &SqlitePool) -> RepoResult<Vec<Ticket>> {
    let rows = sqlx::query_as::<_, Ticket>(&format!(
        "SELECT {TICKET_COLUMNS} FROM ticket WHERE is_active = 1 ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_active_addons(pool: &SqlitePool) -> RepoResult<Vec<Addon>> {
    let rows = sqlx::query_as::<_, Addon>(
        "SELECT id, name, description, slug, category, is_active, price, price_reseller \
         FROM addon WHERE is_active = 1 ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_override(pool: &SqlitePool, date: &str) -> RepoResult<Option<DateOverride>> {
    let row = sqlx::query_as::<_, DateOverride>(
        "SELECT id, date, kind, note FROM date_override WHERE date = ?",
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_override(
    pool: &SqlitePool,
    date: &str,
    kind: OverrideKind,
    note: Option<&str>,
) -> RepoResult<DateOverride> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO date_override (id, date, kind, note) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(date)
        .bind(kind)
        .bind(note)
        .execute(pool)
        .await?;

    find_override(pool, date)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create date override".into()))
}

pub async fn delete_override(pool: &SqlitePool, date: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM date_override WHERE date = ?")
        .bind(date)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
