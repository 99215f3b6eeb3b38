//! Reseller account repository

use super::{RepoError, RepoResult};
use shared::models::ResellerAccount;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, agency, email, phone, password_hash, deposit_balance, \
    deposit_expires_at, is_active, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ResellerAccount>> {
    let row =
        sqlx::query_as::<_, ResellerAccount>(&format!("SELECT {COLUMNS} FROM reseller WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<ResellerAccount>> {
    let row = sqlx::query_as::<_, ResellerAccount>(&format!(
        "SELECT {COLUMNS} FROM reseller WHERE email = ?"
    ))
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    agency: &str,
    email: &str,
    phone: &str,
    password_hash: &str,
) -> RepoResult<ResellerAccount> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO reseller (id, name, agency, email, phone, password_hash, deposit_balance, \
         is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, 0, 1, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(agency)
    .bind(email.trim().to_lowercase())
    .bind(phone)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reseller".into()))
}

/// Debit the deposit balance, guarded so it never goes negative
///
/// Returns `false` when the balance was insufficient; nothing is changed in
/// that case.
pub async fn try_debit(pool: &SqlitePool, id: i64, amount: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE reseller SET deposit_balance = deposit_balance - ? \
         WHERE id = ? AND deposit_balance >= ?",
    )
    .bind(amount)
    .bind(id)
    .bind(amount)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Credit the balance without touching the expiry deadline
pub async fn credit(pool: &SqlitePool, id: i64, amount: i64) -> RepoResult<()> {
    sqlx::query("UPDATE reseller SET deposit_balance = deposit_balance + ? WHERE id = ?")
        .bind(amount)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Credit the balance and extend the deposit expiry deadline
pub async fn credit_and_extend(
    pool: &SqlitePool,
    id: i64,
    amount: i64,
    new_expires_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE reseller SET deposit_balance = deposit_balance + ?, deposit_expires_at = ? \
         WHERE id = ?",
    )
    .bind(amount)
    .bind(new_expires_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE reseller SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    async fn seed_reseller(pool: &SqlitePool) -> ResellerAccount {
        create(pool, "Budi", "Jaya Tour", "Budi@Example.com", "0811", "hash")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_email_normalized() {
        let pool = test_pool().await;
        seed_reseller(&pool).await;
        let found = find_by_email(&pool, "budi@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email, "budi@example.com");
    }

    #[tokio::test]
    async fn test_debit_insufficient_balance_rejected() {
        let pool = test_pool().await;
        let r = seed_reseller(&pool).await;
        credit_and_extend(&pool, r.id, 30_000, 9_999_999).await.unwrap();

        assert!(!try_debit(&pool, r.id, 50_000).await.unwrap());
        let r = find_by_id(&pool, r.id).await.unwrap().unwrap();
        assert_eq!(r.deposit_balance, 30_000);
    }

    #[tokio::test]
    async fn test_debit_success() {
        let pool = test_pool().await;
        let r = seed_reseller(&pool).await;
        credit_and_extend(&pool, r.id, 100_000, 9_999_999).await.unwrap();

        assert!(try_debit(&pool, r.id, 50_000).await.unwrap());
        let r = find_by_id(&pool, r.id).await.unwrap().unwrap();
        assert_eq!(r.deposit_balance, 50_000);
        assert_eq!(r.deposit_expires_at, Some(9_999_999));
    }
}
