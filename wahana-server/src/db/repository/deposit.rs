//! Deposit transaction repository

use super::{RepoError, RepoResult};
use shared::models::{DepositStatus, DepositTransaction, DepositType};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, reseller_id, amount, kind, status, external_id, gateway_invoice_id, \
    gateway_invoice_url, description, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DepositTransaction>> {
    let row = sqlx::query_as::<_, DepositTransaction>(&format!(
        "SELECT {COLUMNS} FROM deposit_transaction WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_external_id(
    pool: &SqlitePool,
    external_id: &str,
) -> RepoResult<Option<DepositTransaction>> {
    let row = sqlx::query_as::<_, DepositTransaction>(&format!(
        "SELECT {COLUMNS} FROM deposit_transaction WHERE external_id = ?"
    ))
    .bind(external_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_reseller(
    pool: &SqlitePool,
    reseller_id: i64,
) -> RepoResult<Vec<DepositTransaction>> {
    let rows = sqlx::query_as::<_, DepositTransaction>(&format!(
        "SELECT {COLUMNS} FROM deposit_transaction WHERE reseller_id = ? ORDER BY created_at DESC"
    ))
    .bind(reseller_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Count of completed top-ups, used to choose the minimum top-up amount
pub async fn count_completed_topups(pool: &SqlitePool, reseller_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM deposit_transaction \
         WHERE reseller_id = ? AND kind = 'topup' AND status = 'completed'",
    )
    .bind(reseller_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub struct NewDeposit<'a> {
    pub reseller_id: i64,
    pub amount: i64,
    pub kind: DepositType,
    pub status: DepositStatus,
    pub external_id: Option<&'a str>,
    pub description: Option<&'a str>,
}

pub async fn create(pool: &SqlitePool, new: NewDeposit<'_>) -> RepoResult<DepositTransaction> {
    if new.amount == 0 {
        return Err(RepoError::Validation("Deposit amount must be non-zero".into()));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO deposit_transaction \
         (id, reseller_id, amount, kind, status, external_id, description, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(new.reseller_id)
    .bind(new.amount)
    .bind(new.kind)
    .bind(new.status)
    .bind(new.external_id)
    .bind(new.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create deposit transaction".into()))
}

pub async fn set_gateway_invoice(
    pool: &SqlitePool,
    id: i64,
    invoice_id: &str,
    invoice_url: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE deposit_transaction SET gateway_invoice_id = ?, gateway_invoice_url = ? \
         WHERE id = ?",
    )
    .bind(invoice_id)
    .bind(invoice_url)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Move a pending transaction to a terminal status
///
/// Returns `false` when the row was not pending, which makes webhook
/// re-delivery a no-op.
pub async fn transition_from_pending(
    pool: &SqlitePool,
    id: i64,
    to: DepositStatus,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE deposit_transaction SET status = ? WHERE id = ? AND status = 'pending'",
    )
    .bind(to)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM deposit_transaction WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;
    use crate::db::repository::reseller;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> (SqlitePool, i64) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        let r = reseller::create(&pool, "Budi", "Jaya", "b@e.com", "0811", "hash")
            .await
            .unwrap();
        (pool, r.id)
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let (pool, rid) = test_pool().await;
        let err = create(
            &pool,
            NewDeposit {
                reseller_id: rid,
                amount: 0,
                kind: DepositType::Adjustment,
                status: DepositStatus::Completed,
                external_id: None,
                description: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_transition_from_pending_once() {
        let (pool, rid) = test_pool().await;
        let tx = create(
            &pool,
            NewDeposit {
                reseller_id: rid,
                amount: 100_000_000,
                kind: DepositType::Topup,
                status: DepositStatus::Pending,
                external_id: Some("TOPUP-1-1000"),
                description: None,
            },
        )
        .await
        .unwrap();

        assert!(transition_from_pending(&pool, tx.id, DepositStatus::Completed)
            .await
            .unwrap());
        // second delivery is a no-op
        assert!(!transition_from_pending(&pool, tx.id, DepositStatus::Completed)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_external_id_unique() {
        let (pool, rid) = test_pool().await;
        let new = |ext: &'static str| NewDeposit {
            reseller_id: rid,
            amount: 1_000,
            kind: DepositType::Topup,
            status: DepositStatus::Pending,
            external_id: Some(ext),
            description: None,
        };
        create(&pool, new("TOPUP-X")).await.unwrap();
        let err = create(&pool, new("TOPUP-X")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_count_completed_topups() {
        let (pool, rid) = test_pool().await;
        let tx = create(
            &pool,
            NewDeposit {
                reseller_id: rid,
                amount: 100_000_000,
                kind: DepositType::Topup,
                status: DepositStatus::Pending,
                external_id: Some("TOPUP-A"),
                description: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(count_completed_topups(&pool, rid).await.unwrap(), 0);

        transition_from_pending(&pool, tx.id, DepositStatus::Completed)
            .await
            .unwrap();
        assert_eq!(count_completed_topups(&pool, rid).await.unwrap(), 1);
    }
}
