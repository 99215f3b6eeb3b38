//! Order lifecycle
//!
//! Checkout orchestration, number generation, expiry handling and the
//! privileged admin status override.

pub mod checkout;
pub mod codes;
pub mod expiry;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, PaymentStatus};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::notify::{Notification, NotifyService};

pub use checkout::{checkout, CheckoutRequest};

/// Privileged status write for admin tooling
///
/// Bypasses the pending-only transition guard; notifications still fire for
/// transitions into paid and for a pending order forced to expired.
pub async fn admin_set_status(
    pool: &SqlitePool,
    notify: &NotifyService,
    order_id: i64,
    to: PaymentStatus,
) -> AppResult<Order> {
    let before = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    order::force_status(pool, order_id, to).await?;

    match (before.payment_status, to) {
        (prev, PaymentStatus::Paid) if prev != PaymentStatus::Paid => {
            notify.enqueue(Notification::Eticket {
                email: before.customer_email.clone(),
                ticket_code: before.ticket_code.clone(),
                invoice_number: before.invoice_number.clone(),
            });
        }
        (PaymentStatus::Pending, PaymentStatus::Expired) => {
            notify.enqueue(Notification::Expired {
                email: before.customer_email.clone(),
                invoice_number: before.invoice_number.clone(),
            });
        }
        _ => {}
    }

    tracing::info!(
        invoice = %before.invoice_number,
        from = ?before.payment_status,
        to = ?to,
        "Admin status override"
    );

    order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}
