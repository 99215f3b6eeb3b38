//! Notification dispatch
//!
//! A bounded work queue drained by a background worker. Enqueueing never
//! fails the caller; a full queue or a failed delivery is logged and dropped
//! after its single attempt.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const QUEUE_CAPACITY: usize = 256;

/// An outbound customer notification
#[derive(Debug, Clone)]
pub enum Notification {
    /// Payment instructions for a fresh pending order
    Invoice {
        email: String,
        invoice_number: String,
        payment_url: Option<String>,
    },
    /// E-ticket for a paid order
    Eticket {
        email: String,
        ticket_code: String,
        invoice_number: String,
    },
    /// A pending order lapsed unpaid
    Expired {
        email: String,
        invoice_number: String,
    },
    /// Onboarding mail with a temporary password
    ResellerWelcome {
        email: String,
        name: String,
        temp_password: String,
    },
}

/// Delivery transport seam
///
/// Implementations report success as a bool and must not panic; the worker
/// logs failures and moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> bool;
}

/// Default transport: logs deliveries instead of sending them
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, notification: &Notification) -> bool {
        match notification {
            Notification::Invoice {
                email,
                invoice_number,
                ..
            } => tracing::info!(%email, %invoice_number, "Invoice notification"),
            Notification::Eticket {
                email, ticket_code, ..
            } => tracing::info!(%email, %ticket_code, "E-ticket notification"),
            Notification::Expired {
                email,
                invoice_number,
            } => tracing::info!(%email, %invoice_number, "Expired-order notification"),
            Notification::ResellerWelcome { email, name, .. } => {
                tracing::info!(%email, %name, "Reseller welcome notification")
            }
        }
        true
    }
}

/// Handle for enqueueing notifications
#[derive(Clone)]
pub struct NotifyService {
    tx: mpsc::Sender<Notification>,
}

impl NotifyService {
    /// Build the service and its worker future
    ///
    /// The caller spawns the returned future; it drains the queue on
    /// cancellation before exiting.
    pub fn start(
        notifier: Arc<dyn Notifier>,
        shutdown: CancellationToken,
    ) -> (Self, impl std::future::Future<Output = ()>) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let worker = run_worker(notifier, rx, shutdown);
        (Self { tx }, worker)
    }

    /// Fire-and-forget enqueue
    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            tracing::warn!(error = %e, "Notification queue full, dropping notification");
        }
    }
}

async fn run_worker(
    notifier: Arc<dyn Notifier>,
    mut rx: mpsc::Receiver<Notification>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            maybe = rx.recv() => {
                match maybe {
                    Some(notification) => {
                        if !notifier.deliver(&notification).await {
                            tracing::warn!(?notification, "Notification delivery failed");
                        }
                    }
                    None => break,
                }
            }
            _ = shutdown.cancelled() => {
                // drain whatever is already queued, then stop
                rx.close();
                while let Some(notification) = rx.recv().await {
                    if !notifier.deliver(&notification).await {
                        tracing::warn!(?notification, "Notification delivery failed");
                    }
                }
                break;
            }
        }
    }
    tracing::debug!("Notification worker stopped");
}
