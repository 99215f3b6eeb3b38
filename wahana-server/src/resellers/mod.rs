//! Reseller account services
//!
//! Onboarding with a generated temporary password and deposit top-ups via
//! the hosted payment gateway.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use rand::Rng;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DepositStatus, DepositTransaction, DepositType, ResellerAccount};
use sqlx::SqlitePool;

use crate::db::repository::{deposit, reseller, settings};
use crate::notify::{Notification, NotifyService};
use crate::payment::gateway::{CreateInvoiceRequest, CustomerInfo, PaymentGateway};

const TEMP_PASSWORD_LEN: usize = 12;
const PASSWORD_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";

fn generate_temp_password() -> String {
    let mut rng = rand::thread_rng();
    (0..TEMP_PASSWORD_LEN)
        .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Create a reseller account with a generated temporary password
///
/// The welcome notification carrying the password is fire-and-forget.
pub async fn onboard(
    pool: &SqlitePool,
    notify: &NotifyService,
    name: &str,
    agency: &str,
    email: &str,
    phone: &str,
) -> AppResult<ResellerAccount> {
    if reseller::find_by_email(pool, email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let temp_password = generate_temp_password();
    let password_hash = hash_password(&temp_password)?;

    let account = reseller::create(pool, name, agency, email, phone, &password_hash).await?;

    notify.enqueue(Notification::ResellerWelcome {
        email: account.email.clone(),
        name: account.name.clone(),
        temp_password,
    });

    tracing::info!(reseller = account.id, %email, "Reseller onboarded");
    Ok(account)
}

/// Enable or disable a reseller account
///
/// Disabled accounts cannot spend their deposit or top it up.
pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> AppResult<()> {
    if !reseller::set_active(pool, id, is_active).await? {
        return Err(AppError::new(ErrorCode::ResellerNotFound));
    }
    tracing::info!(reseller = id, is_active, "Reseller active flag changed");
    Ok(())
}

/// Load a reseller account for display, with the deposit-expiry flag
/// evaluated as of now
pub async fn get_account(pool: &SqlitePool, id: i64) -> AppResult<(ResellerAccount, bool)> {
    let account = reseller::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResellerNotFound))?;
    let expired = account.deposit_expired(shared::util::now_millis());
    Ok((account, expired))
}

/// Start a deposit top-up through the hosted gateway
///
/// The first top-up must meet the initial minimum; later ones the renewal
/// minimum. The pending transaction is rolled back if the gateway call
/// fails, so a failed top-up leaves no trace.
pub async fn topup(
    pool: &SqlitePool,
    gateway: &dyn PaymentGateway,
    reseller_id: i64,
    amount: i64,
) -> AppResult<DepositTransaction> {
    let account = reseller::find_by_id(pool, reseller_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ResellerNotFound))?;
    if !account.is_active {
        return Err(AppError::new(ErrorCode::ResellerInactive));
    }

    let cfg = settings::load(pool).await?;
    let completed = deposit::count_completed_topups(pool, reseller_id).await?;
    let minimum = if completed == 0 {
        cfg.min_reseller_deposit
    } else {
        cfg.min_reseller_deposit_renewal
    };
    if amount < minimum {
        return Err(AppError::new(ErrorCode::TopupBelowMinimum)
            .with_detail("minimum", minimum)
            .with_detail("amount", amount));
    }

    let external_id = format!("TOPUP-{}-{}", reseller_id, shared::util::now_millis());
    let tx = deposit::create(
        pool,
        deposit::NewDeposit {
            reseller_id,
            amount,
            kind: DepositType::Topup,
            status: DepositStatus::Pending,
            external_id: Some(&external_id),
            description: Some("Deposit top-up"),
        },
    )
    .await?;

    let invoice = match gateway
        .create_invoice(CreateInvoiceRequest {
            external_id: external_id.clone(),
            amount,
            description: format!("Deposit top-up for {}", account.agency),
            customer: CustomerInfo {
                name: account.name.clone(),
                email: account.email.clone(),
                phone: account.phone.clone(),
            },
            method_hint: None,
        })
        .await
    {
        Ok(invoice) => invoice,
        Err(e) => {
            // unlike orders, an unpayable top-up row is useless
            if let Err(del) = deposit::delete(pool, tx.id).await {
                tracing::error!(id = tx.id, error = %del, "Failed to roll back top-up transaction");
            }
            return Err(e.into());
        }
    };

    deposit::set_gateway_invoice(pool, tx.id, &invoice.id, &invoice.invoice_url).await?;
    tracing::info!(reseller = reseller_id, amount, %external_id, "Top-up invoice created");

    deposit::find_by_id(pool, tx.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepositTransactionNotFound))
}
