//! Order expiry
//!
//! Pending orders past their payment deadline are expired lazily when read
//! and by a periodic sweep.

use std::time::Duration;

use shared::error::AppResult;
use shared::models::{Order, PaymentStatus};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::db::repository::order;
use crate::notify::{Notification, NotifyService};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Observe-time expiry check for a single order
///
/// Returns the order with its status as of now; if the deadline has passed
/// the order is transitioned and the expiry notification enqueued.
pub async fn expire_if_overdue(
    pool: &SqlitePool,
    notify: &NotifyService,
    order_row: Order,
) -> AppResult<Order> {
    let now = shared::util::now_millis();
    if !order_row.is_expired_at(now) {
        return Ok(order_row);
    }

    let transitioned =
        order::transition_from_pending(pool, order_row.id, PaymentStatus::Expired).await?;
    if transitioned {
        notify.enqueue(Notification::Expired {
            email: order_row.customer_email.clone(),
            invoice_number: order_row.invoice_number.clone(),
        });
        tracing::info!(invoice = %order_row.invoice_number, "Order expired on read");
    }

    Ok(Order {
        payment_status: PaymentStatus::Expired,
        ..order_row
    })
}

/// Expire every overdue pending order, enqueueing notifications
pub async fn sweep(pool: &SqlitePool, notify: &NotifyService) -> AppResult<usize> {
    let expired = order::expire_overdue(pool, shared::util::now_millis()).await?;
    for o in &expired {
        notify.enqueue(Notification::Expired {
            email: o.customer_email.clone(),
            invoice_number: o.invoice_number.clone(),
        });
    }
    if !expired.is_empty() {
        tracing::info!(count = expired.len(), "Expired overdue pending orders");
    }
    Ok(expired.len())
}

/// Periodic sweep loop, cancelled via the task manager's token
pub async fn run_sweep_loop(pool: SqlitePool, notify: NotifyService, shutdown: CancellationToken) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = sweep(&pool, &notify).await {
                    tracing::error!(error = %e, "Expiry sweep failed");
                }
            }
            _ = shutdown.cancelled() => break,
        }
    }
}
