//! Webhook reconciliation
//!
//! Translates gateway callback events into local state transitions. All
//! transitions are idempotent: re-delivery of a terminal status changes
//! nothing and triggers no duplicate side effects.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DepositStatus, DepositType, PaymentStatus};
use sqlx::SqlitePool;

use crate::db::repository::{deposit, order, reseller, settings};
use crate::notify::{Notification, NotifyService};

/// Gateway-reported statuses we act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportedStatus {
    Paid,
    Expired,
}

fn parse_status(raw: &str) -> Option<ReportedStatus> {
    match raw.to_uppercase().as_str() {
        "PAID" | "SETTLED" => Some(ReportedStatus::Paid),
        "EXPIRED" => Some(ReportedStatus::Expired),
        _ => None,
    }
}

/// Process a gateway callback
///
/// The callback token must match the configured secret; when no secret is
/// configured every callback is rejected. The external id is matched against
/// order invoice numbers first, then deposit-transaction external ids.
pub async fn handle_webhook(
    pool: &SqlitePool,
    notify: &NotifyService,
    token: Option<&str>,
    external_id: &str,
    reported: &str,
) -> AppResult<()> {
    let cfg = settings::load(pool).await?;
    match cfg.webhook_token.as_deref() {
        Some(secret) if token == Some(secret) => {}
        Some(_) => return Err(AppError::new(ErrorCode::WebhookTokenInvalid)),
        None => {
            tracing::warn!("Webhook received but no webhook token configured, rejecting");
            return Err(AppError::new(ErrorCode::WebhookTokenInvalid));
        }
    }

    let Some(status) = parse_status(reported) else {
        return Err(AppError::validation(format!(
            "Unsupported webhook status: {reported}"
        )));
    };

    if let Some(o) = order::find_by_invoice_number(pool, external_id).await? {
        return reconcile_order(pool, notify, &o, status).await;
    }

    if let Some(tx) = deposit::find_by_external_id(pool, external_id).await? {
        return reconcile_deposit(pool, &tx, status, cfg.reseller_deposit_duration_days).await;
    }

    Err(AppError::with_message(
        ErrorCode::WebhookTargetNotFound,
        format!("No order or deposit matches external id {external_id}"),
    ))
}

async fn reconcile_order(
    pool: &SqlitePool,
    notify: &NotifyService,
    o: &shared::models::Order,
    status: ReportedStatus,
) -> AppResult<()> {
    let target = match status {
        ReportedStatus::Paid => PaymentStatus::Paid,
        ReportedStatus::Expired => PaymentStatus::Expired,
    };

    let transitioned = order::transition_from_pending(pool, o.id, target).await?;
    if !transitioned {
        tracing::info!(invoice = %o.invoice_number, "Webhook re-delivery ignored, order already terminal");
        return Ok(());
    }

    match target {
        PaymentStatus::Paid => notify.enqueue(Notification::Eticket {
            email: o.customer_email.clone(),
            ticket_code: o.ticket_code.clone(),
            invoice_number: o.invoice_number.clone(),
        }),
        PaymentStatus::Expired => notify.enqueue(Notification::Expired {
            email: o.customer_email.clone(),
            invoice_number: o.invoice_number.clone(),
        }),
        _ => {}
    }

    tracing::info!(invoice = %o.invoice_number, status = ?target, "Order reconciled from webhook");
    Ok(())
}

async fn reconcile_deposit(
    pool: &SqlitePool,
    tx: &shared::models::DepositTransaction,
    status: ReportedStatus,
    duration_days: i64,
) -> AppResult<()> {
    let target = match status {
        ReportedStatus::Paid => DepositStatus::Completed,
        ReportedStatus::Expired => DepositStatus::Expired,
    };

    // pending→terminal CAS is the exactly-once guard for the balance credit
    let transitioned = deposit::transition_from_pending(pool, tx.id, target).await?;
    if !transitioned {
        tracing::info!(id = tx.id, "Webhook re-delivery ignored, deposit already terminal");
        return Ok(());
    }

    if target == DepositStatus::Completed && tx.kind == DepositType::Topup {
        let new_expiry = shared::util::now_millis() + duration_days * 24 * 60 * 60 * 1000;
        reseller::credit_and_extend(pool, tx.reseller_id, tx.amount, new_expiry).await?;
        tracing::info!(
            reseller = tx.reseller_id,
            amount = tx.amount,
            "Deposit top-up credited"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;
    use crate::db::repository::deposit::NewDeposit;
    use crate::notify::{LogNotifier, NotifyService};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    async fn test_env() -> (SqlitePool, NotifyService) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();

        let mut cfg = settings::load(&pool).await.unwrap();
        cfg.webhook_token = Some("secret".into());
        settings::update(&pool, &cfg).await.unwrap();

        let (notify, worker) = NotifyService::start(Arc::new(LogNotifier), CancellationToken::new());
        tokio::spawn(worker);
        (pool, notify)
    }

    async fn seed_topup(pool: &SqlitePool) -> (i64, shared::models::DepositTransaction) {
        let r = reseller::create(pool, "Budi", "Jaya", "b@e.com", "0811", "hash")
            .await
            .unwrap();
        let tx = deposit::create(
            pool,
            NewDeposit {
                reseller_id: r.id,
                amount: 100_000_000,
                kind: DepositType::Topup,
                status: DepositStatus::Pending,
                external_id: Some("TOPUP-1-1000"),
                description: None,
            },
        )
        .await
        .unwrap();
        (r.id, tx)
    }

    #[tokio::test]
    async fn test_bad_token_rejected() {
        let (pool, notify) = test_env().await;
        let err = handle_webhook(&pool, &notify, Some("wrong"), "INV-X", "PAID")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookTokenInvalid);
    }

    #[tokio::test]
    async fn test_no_configured_token_rejects_everything() {
        let (pool, notify) = test_env().await;
        let mut cfg = settings::load(&pool).await.unwrap();
        cfg.webhook_token = None;
        settings::update(&pool, &cfg).await.unwrap();

        let err = handle_webhook(&pool, &notify, Some("anything"), "INV-X", "PAID")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookTokenInvalid);
    }

    #[tokio::test]
    async fn test_unknown_external_id() {
        let (pool, notify) = test_env().await;
        let err = handle_webhook(&pool, &notify, Some("secret"), "INV-NOPE", "PAID")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookTargetNotFound);
    }

    #[tokio::test]
    async fn test_topup_credited_exactly_once() {
        let (pool, notify) = test_env().await;
        let (rid, _tx) = seed_topup(&pool).await;

        handle_webhook(&pool, &notify, Some("secret"), "TOPUP-1-1000", "PAID")
            .await
            .unwrap();
        let r = reseller::find_by_id(&pool, rid).await.unwrap().unwrap();
        assert_eq!(r.deposit_balance, 100_000_000);
        assert!(r.deposit_expires_at.is_some());

        // duplicate delivery: acked but no second credit
        handle_webhook(&pool, &notify, Some("secret"), "TOPUP-1-1000", "SETTLED")
            .await
            .unwrap();
        let r = reseller::find_by_id(&pool, rid).await.unwrap().unwrap();
        assert_eq!(r.deposit_balance, 100_000_000);
    }

    #[tokio::test]
    async fn test_topup_expired_no_credit() {
        let (pool, notify) = test_env().await;
        let (rid, _tx) = seed_topup(&pool).await;

        handle_webhook(&pool, &notify, Some("secret"), "TOPUP-1-1000", "EXPIRED")
            .await
            .unwrap();
        let r = reseller::find_by_id(&pool, rid).await.unwrap().unwrap();
        assert_eq!(r.deposit_balance, 0);
    }

    #[tokio::test]
    async fn test_unsupported_status_rejected() {
        let (pool, notify) = test_env().await;
        seed_topup(&pool).await;
        let err = handle_webhook(&pool, &notify, Some("secret"), "TOPUP-1-1000", "REFUNDED")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
