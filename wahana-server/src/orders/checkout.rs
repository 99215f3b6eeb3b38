//! Checkout orchestration
//!
//! Turns a priced cart into a durable order: classification, pricing,
//! discounts, numbering, the synchronous deposit path and the hosted
//! gateway request.

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CartInput, DepositStatus, DepositType, Order, PaymentMethod, PaymentStatus, Role, VisitType,
};
use sqlx::SqlitePool;

use super::codes;
use crate::db::repository::{catalog, deposit, order, partner, promo, reseller, settings, RepoError};
use crate::notify::{Notification, NotifyService};
use crate::payment::gateway::{CreateInvoiceRequest, CustomerInfo, PaymentGateway};
use crate::pricing::{self, Catalog, PartnerContext};

/// Attempts at a collision-free ticket code before giving up
const MAX_CODE_ATTEMPTS: usize = 8;

pub struct CheckoutRequest {
    pub visit_date: String,
    pub visit_type: VisitType,
    pub cart: CartInput,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub promo_code: Option<String>,
    pub partner_phone: Option<String>,
    pub reseller_id: Option<i64>,
}

/// Create an order from a cart
///
/// Deposit payments debit the reseller balance synchronously and come out
/// paid; every other method starts pending. A gateway failure is logged and
/// leaves the pending order without a hosted URL.
pub async fn checkout(
    pool: &SqlitePool,
    gateway: &dyn PaymentGateway,
    notify: &NotifyService,
    req: CheckoutRequest,
    role: Role,
) -> AppResult<Order> {
    let visit_date: NaiveDate = req
        .visit_date
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid visit date: {}", req.visit_date)))?;

    if req.cart.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let cfg = settings::load(pool).await?;

    let override_kind = catalog::find_override(pool, &req.visit_date)
        .await?
        .map(|o| o.kind);
    let date_class = pricing::classify(visit_date, override_kind, &cfg.closed_weekdays());

    let shop = Catalog {
        tickets: catalog::find_active_tickets(pool).await?,
        addons: catalog::find_active_addons(pool).await?,
    };
    let priced = pricing::price_cart(&shop, &req.cart, &req.visit_date, date_class, role)?;

    let promo_row = match &req.promo_code {
        Some(code) => Some(
            promo::find_active_by_code(pool, code)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::PromoNotFound))?,
        ),
        None => None,
    };

    let partner_row = match &req.partner_phone {
        Some(phone) => Some(
            partner::find_active_by_phone(pool, phone)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::PartnerNotFound))?,
        ),
        None => None,
    };

    let outcome = pricing::apply_discounts(
        priced.subtotal,
        promo_row.as_ref(),
        partner_row.as_ref().map(|p| PartnerContext {
            name: &p.name,
            fee_percentage: p.fee_percentage,
            group_subtotal: priced.group_subtotal(),
        }),
    );

    let mut details = priced.details;
    details.promo = outcome.promo.clone();
    details.partner = outcome.partner.clone();

    // Deposit debit happens before the order exists; a failed debit leaves
    // no order row behind.
    let (initial_status, debited_reseller) = if req.payment_method == PaymentMethod::Deposit {
        let id = debit_reseller_deposit(pool, &req, outcome.final_total).await?;
        (PaymentStatus::Paid, Some(id))
    } else {
        (PaymentStatus::Pending, None)
    };

    let now = shared::util::now_millis();
    let today = codes::today_stamp();
    let seq = order::next_invoice_seq(pool, &today).await?;
    let invoice_number = codes::format_invoice_number(&today, seq);

    let mut created: Option<Order> = None;
    for _ in 0..MAX_CODE_ATTEMPTS {
        let ticket_code = codes::generate_ticket_code(&today);
        match order::create(
            pool,
            order::NewOrder {
                ticket_code: &ticket_code,
                invoice_number: &invoice_number,
                visit_date: &req.visit_date,
                visit_type: req.visit_type,
                details: &details,
                customer_name: &req.customer_name,
                customer_email: &req.customer_email,
                customer_phone: &req.customer_phone,
                subtotal: priced.subtotal,
                discount_amount: outcome.discount_amount,
                total_price: outcome.final_total,
                promo_code: details.promo.as_ref().map(|p| p.code.as_str()),
                payment_method: req.payment_method,
                payment_status: initial_status,
                reseller_id: req.reseller_id,
                partner_id: partner_row.as_ref().map(|p| p.id),
                created_at: now,
                expires_at: now + cfg.payment_timeout_millis(),
            },
        )
        .await
        {
            Ok(o) => {
                created = Some(o);
                break;
            }
            Err(RepoError::Duplicate(msg)) if msg.contains("ticket_code") => continue,
            Err(e) => {
                rollback_debit(pool, debited_reseller, outcome.final_total).await;
                return Err(e.into());
            }
        }
    }

    let Some(order_row) = created else {
        rollback_debit(pool, debited_reseller, outcome.final_total).await;
        return Err(AppError::new(ErrorCode::CodeSpaceExhausted));
    };

    if let Some(reseller_id) = debited_reseller {
        deposit::create(
            pool,
            deposit::NewDeposit {
                reseller_id,
                amount: -outcome.final_total,
                kind: DepositType::Purchase,
                status: DepositStatus::Completed,
                external_id: None,
                description: Some(&format!("Order {}", order_row.invoice_number)),
            },
        )
        .await?;
    }

    let order_row = match initial_status {
        PaymentStatus::Paid => {
            notify.enqueue(Notification::Eticket {
                email: order_row.customer_email.clone(),
                ticket_code: order_row.ticket_code.clone(),
                invoice_number: order_row.invoice_number.clone(),
            });
            order_row
        }
        _ => request_hosted_invoice(pool, gateway, notify, order_row).await?,
    };

    tracing::info!(
        invoice = %order_row.invoice_number,
        total = order_row.total_price,
        method = ?order_row.payment_method,
        status = ?order_row.payment_status,
        "Order created"
    );
    Ok(order_row)
}

async fn debit_reseller_deposit(
    pool: &SqlitePool,
    req: &CheckoutRequest,
    amount: i64,
) -> AppResult<i64> {
    let reseller_id = req
        .reseller_id
        .ok_or_else(|| AppError::validation("Deposit payment requires a reseller account"))?;
    let account = reseller::find_by_id(pool, reseller_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResellerNotFound))?;

    if !account.is_active {
        return Err(AppError::new(ErrorCode::ResellerInactive));
    }
    if account.deposit_expired(shared::util::now_millis()) {
        return Err(AppError::new(ErrorCode::DepositExpired));
    }
    if !reseller::try_debit(pool, reseller_id, amount).await? {
        return Err(AppError::insufficient_balance(account.deposit_balance, amount));
    }
    Ok(reseller_id)
}

async fn rollback_debit(pool: &SqlitePool, reseller_id: Option<i64>, amount: i64) {
    if let Some(id) = reseller_id {
        if let Err(e) = reseller::credit(pool, id, amount).await {
            tracing::error!(reseller = id, amount, error = %e, "Failed to refund deposit debit");
        }
    }
}

/// Request a hosted invoice for gateway methods; failures keep the order
/// pending without a URL
async fn request_hosted_invoice(
    pool: &SqlitePool,
    gateway: &dyn PaymentGateway,
    notify: &NotifyService,
    order_row: Order,
) -> AppResult<Order> {
    let mut payment_url = None;

    if order_row.payment_method.is_gateway() {
        let request = CreateInvoiceRequest {
            external_id: order_row.invoice_number.clone(),
            amount: order_row.total_price,
            description: format!("Ticket order {}", order_row.invoice_number),
            customer: CustomerInfo {
                name: order_row.customer_name.clone(),
                email: order_row.customer_email.clone(),
                phone: order_row.customer_phone.clone(),
            },
            method_hint: order_row.payment_method.gateway_hint(),
        };
        match gateway.create_invoice(request).await {
            Ok(invoice) => {
                order::set_gateway_invoice(pool, order_row.id, &invoice.id, &invoice.invoice_url)
                    .await?;
                payment_url = Some(invoice.invoice_url);
            }
            Err(e) => {
                tracing::warn!(
                    invoice = %order_row.invoice_number,
                    error = %e,
                    "Gateway invoice creation failed, order stays pending"
                );
            }
        }
    }

    notify.enqueue(Notification::Invoice {
        email: order_row.customer_email.clone(),
        invoice_number: order_row.invoice_number.clone(),
        payment_url,
    });

    order::find_by_id(pool, order_row.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}
