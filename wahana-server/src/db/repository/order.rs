//! Order repository
//!
//! Persistence for orders, the per-day invoice counter and the scan stamps.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderDetails, PaymentMethod, PaymentStatus, VisitType};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, ticket_code, invoice_number, visit_date, visit_type, details, \
    customer_name, customer_email, customer_phone, subtotal, discount_amount, total_price, \
    promo_code, payment_method, payment_status, gateway_invoice_id, gateway_invoice_url, \
    reseller_id, partner_id, created_at, expires_at, wristband_at, checkin_at, checkin_gate";

/// Next invoice sequence number for a `YYYYMMDD` day key
///
/// The counter row is seeded once from the count of already-issued invoice
/// numbers for that day, then incremented atomically. Concurrent checkouts
/// therefore never observe the same sequence value.
pub async fn next_invoice_seq(pool: &SqlitePool, day: &str) -> RepoResult<i64> {
    sqlx::query(
        "INSERT INTO invoice_counter (day, seq) \
         SELECT ?1, COUNT(*) FROM orders WHERE invoice_number LIKE 'INV-' || ?1 || '-%' \
         ON CONFLICT(day) DO NOTHING",
    )
    .bind(day)
    .execute(pool)
    .await?;

    let seq: i64 =
        sqlx::query_scalar("UPDATE invoice_counter SET seq = seq + 1 WHERE day = ? RETURNING seq")
            .bind(day)
            .fetch_one(pool)
            .await?;
    Ok(seq)
}

pub struct NewOrder<'a> {
    pub ticket_code: &'a str,
    pub invoice_number: &'a str,
    pub visit_date: &'a str,
    pub visit_type: VisitType,
    pub details: &'a OrderDetails,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub customer_phone: &'a str,
    pub subtotal: i64,
    pub discount_amount: i64,
    pub total_price: i64,
    pub promo_code: Option<&'a str>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub reseller_id: Option<i64>,
    pub partner_id: Option<i64>,
    pub created_at: i64,
    pub expires_at: i64,
}

pub async fn create(pool: &SqlitePool, new: NewOrder<'_>) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let details = serde_json::to_string(new.details)
        .map_err(|e| RepoError::Validation(format!("Unserializable order details: {e}")))?;

    sqlx::query(
        "INSERT INTO orders (id, ticket_code, invoice_number, visit_date, visit_type, details, \
         customer_name, customer_email, customer_phone, subtotal, discount_amount, total_price, \
         promo_code, payment_method, payment_status, reseller_id, partner_id, created_at, \
         expires_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(new.ticket_code)
    .bind(new.invoice_number)
    .bind(new.visit_date)
    .bind(new.visit_type)
    .bind(details)
    .bind(new.customer_name)
    .bind(new.customer_email)
    .bind(new.customer_phone)
    .bind(new.subtotal)
    .bind(new.discount_amount)
    .bind(new.total_price)
    .bind(new.promo_code)
    .bind(new.payment_method)
    .bind(new.payment_status)
    .bind(new.reseller_id)
    .bind(new.partner_id)
    .bind(new.created_at)
    .bind(new.expires_at)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_ticket_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE ticket_code = ?"
    ))
    .bind(code.trim().to_uppercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_invoice_number(pool: &SqlitePool, invoice: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE invoice_number = ?"
    ))
    .bind(invoice.trim().to_uppercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Gate-side lookup: ticket code first, invoice number as fallback
pub async fn find_by_code_or_invoice(pool: &SqlitePool, code: &str) -> RepoResult<Option<Order>> {
    if let Some(order) = find_by_ticket_code(pool, code).await? {
        return Ok(Some(order));
    }
    find_by_invoice_number(pool, code).await
}

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Move a pending order into a terminal status
///
/// Returns `false` when the order was not pending, making duplicate webhook
/// deliveries no-ops.
pub async fn transition_from_pending(
    pool: &SqlitePool,
    id: i64,
    to: PaymentStatus,
) -> RepoResult<bool> {
    let result =
        sqlx::query("UPDATE orders SET payment_status = ? WHERE id = ? AND payment_status = 'pending'")
            .bind(to)
            .bind(id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Privileged status write that bypasses the pending guard
pub async fn force_status(pool: &SqlitePool, id: i64, to: PaymentStatus) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE orders SET payment_status = ? WHERE id = ?")
        .bind(to)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_gateway_invoice(
    pool: &SqlitePool,
    id: i64,
    invoice_id: &str,
    invoice_url: &str,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET gateway_invoice_id = ?, gateway_invoice_url = ? WHERE id = ?")
        .bind(invoice_id)
        .bind(invoice_url)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Expire every pending order past its deadline, returning the rows changed
pub async fn expire_overdue(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET payment_status = 'expired' \
         WHERE payment_status = 'pending' AND expires_at < ? RETURNING {COLUMNS}"
    ))
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Record the wristband stamp; fails closed when already stamped
pub async fn stamp_wristband(pool: &SqlitePool, id: i64, at: i64) -> RepoResult<bool> {
    let result =
        sqlx::query("UPDATE orders SET wristband_at = ? WHERE id = ? AND wristband_at IS NULL")
            .bind(at)
            .bind(id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Record the gate check-in stamp with the gate name
pub async fn stamp_checkin(pool: &SqlitePool, id: i64, at: i64, gate: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET checkin_at = ?, checkin_gate = ? WHERE id = ? AND checkin_at IS NULL",
    )
    .bind(at)
    .bind(gate)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;
    use shared::models::{OrderDetails, TicketLine};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    fn sample_details() -> OrderDetails {
        OrderDetails {
            items: vec![TicketLine {
                name: "Entrance".into(),
                qty: 2,
                price: 100_000,
                subtotal: 200_000,
                category: "personal".into(),
            }],
            ..OrderDetails::default()
        }
    }

    async fn seed_order(pool: &SqlitePool, code: &str, invoice: &str, expires_at: i64) -> Order {
        let details = sample_details();
        create(
            pool,
            NewOrder {
                ticket_code: code,
                invoice_number: invoice,
                visit_date: "2024-05-01",
                visit_type: VisitType::Personal,
                details: &details,
                customer_name: "Ani",
                customer_email: "ani@example.com",
                customer_phone: "0812",
                subtotal: 200_000,
                discount_amount: 0,
                total_price: 200_000,
                promo_code: None,
                payment_method: PaymentMethod::Qris,
                payment_status: PaymentStatus::Pending,
                reseller_id: None,
                partner_id: None,
                created_at: 1_000,
                expires_at,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_details_snapshot_round_trip() {
        let pool = test_pool().await;
        let order = seed_order(&pool, "TIX-20240501-ABC123", "INV-20240501-0001", 10_000).await;
        let loaded = find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(loaded.details, sample_details());
    }

    #[tokio::test]
    async fn test_invoice_seq_starts_at_one_and_increments() {
        let pool = test_pool().await;
        assert_eq!(next_invoice_seq(&pool, "20240501").await.unwrap(), 1);
        assert_eq!(next_invoice_seq(&pool, "20240501").await.unwrap(), 2);
        // a different day has its own sequence
        assert_eq!(next_invoice_seq(&pool, "20240502").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invoice_seq_seeds_from_existing_invoices() {
        let pool = test_pool().await;
        for n in 1..=3 {
            seed_order(
                &pool,
                &format!("TIX-20240501-CODE0{n}"),
                &format!("INV-20240501-000{n}"),
                10_000,
            )
            .await;
        }
        assert_eq!(next_invoice_seq(&pool, "20240501").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_transition_from_pending_is_one_shot() {
        let pool = test_pool().await;
        let order = seed_order(&pool, "TIX-20240501-ABC123", "INV-20240501-0001", 10_000).await;

        assert!(transition_from_pending(&pool, order.id, PaymentStatus::Paid)
            .await
            .unwrap());
        assert!(!transition_from_pending(&pool, order.id, PaymentStatus::Expired)
            .await
            .unwrap());

        let loaded = find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(loaded.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_expire_overdue_only_touches_pending() {
        let pool = test_pool().await;
        let overdue = seed_order(&pool, "TIX-20240501-AAA111", "INV-20240501-0001", 5_000).await;
        let fresh = seed_order(&pool, "TIX-20240501-BBB222", "INV-20240501-0002", 50_000).await;
        let paid = seed_order(&pool, "TIX-20240501-CCC333", "INV-20240501-0003", 5_000).await;
        transition_from_pending(&pool, paid.id, PaymentStatus::Paid)
            .await
            .unwrap();

        let expired = expire_overdue(&pool, 10_000).await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, overdue.id);

        let fresh = find_by_id(&pool, fresh.id).await.unwrap().unwrap();
        assert_eq!(fresh.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_stamps_settable_once_and_independent() {
        let pool = test_pool().await;
        let order = seed_order(&pool, "TIX-20240501-ABC123", "INV-20240501-0001", 10_000).await;

        assert!(stamp_wristband(&pool, order.id, 2_000).await.unwrap());
        assert!(!stamp_wristband(&pool, order.id, 3_000).await.unwrap());

        // gate stamp is independent of the wristband stamp
        assert!(stamp_checkin(&pool, order.id, 4_000, "north").await.unwrap());
        assert!(!stamp_checkin(&pool, order.id, 5_000, "south").await.unwrap());

        let loaded = find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(loaded.wristband_at, Some(2_000));
        assert_eq!(loaded.checkin_at, Some(4_000));
        assert_eq!(loaded.checkin_gate.as_deref(), Some("north"));
    }

    #[tokio::test]
    async fn test_lookup_by_code_falls_back_to_invoice() {
        let pool = test_pool().await;
        seed_order(&pool, "TIX-20240501-ABC123", "INV-20240501-0001", 10_000).await;

        let by_code = find_by_code_or_invoice(&pool, "tix-20240501-abc123")
            .await
            .unwrap();
        assert!(by_code.is_some());

        let by_invoice = find_by_code_or_invoice(&pool, "INV-20240501-0001")
            .await
            .unwrap();
        assert!(by_invoice.is_some());

        assert!(find_by_code_or_invoice(&pool, "TIX-NOPE")
            .await
            .unwrap()
            .is_none());
    }
}
