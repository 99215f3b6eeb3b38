//! Check-in/scan processor
//!
//! Gate-side consumption of paid orders: wristband issuance and gate
//! check-in, each stamped at most once and independently of the other.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, PaymentStatus};
use sqlx::SqlitePool;

use crate::db::repository::order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    Wristband,
    Gate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Report state without mutating anything
    Check,
    /// Stamp the scan timestamp
    Execute,
}

/// Scan outcome returned to the operator device
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub ticket_code: String,
    pub invoice_number: String,
    pub payment_status: PaymentStatus,
    pub visit_date: String,
    /// Timestamp of the relevant stamp, present when already scanned
    pub scanned_at: Option<i64>,
    /// Set on execute when the visit date is not today; non-fatal
    pub date_mismatch: bool,
    /// Total passengers on the order, for the operator display
    pub pax: i64,
}

impl ScanResult {
    fn from_order(o: &Order, scan_type: ScanType, date_mismatch: bool) -> Self {
        Self {
            ticket_code: o.ticket_code.clone(),
            invoice_number: o.invoice_number.clone(),
            payment_status: o.payment_status,
            visit_date: o.visit_date.clone(),
            scanned_at: stamp_of(o, scan_type),
            date_mismatch,
            pax: o.details.total_pax(),
        }
    }
}

fn stamp_of(o: &Order, scan_type: ScanType) -> Option<i64> {
    match scan_type {
        ScanType::Wristband => o.wristband_at,
        ScanType::Gate => o.checkin_at,
    }
}

/// Process an operator scan
///
/// The code is matched against ticket codes first, invoice numbers second.
/// `Check` never mutates. `Execute` requires a paid order, rejects a second
/// scan of the same type with the prior timestamp, and flags (without
/// failing) a visit date that is not today.
pub async fn scan(
    pool: &SqlitePool,
    code: &str,
    scan_type: ScanType,
    mode: ScanMode,
    gate: Option<&str>,
) -> AppResult<ScanResult> {
    let o = order::find_by_code_or_invoice(pool, code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let today = shared::util::today_str();
    let date_mismatch = o.visit_date != today;

    if mode == ScanMode::Check {
        return Ok(ScanResult::from_order(&o, scan_type, date_mismatch));
    }

    if o.payment_status != PaymentStatus::Paid {
        return Err(AppError::new(ErrorCode::OrderNotPaid)
            .with_detail("payment_status", format!("{:?}", o.payment_status).to_lowercase()));
    }

    if let Some(at) = stamp_of(&o, scan_type) {
        return Err(AppError::new(ErrorCode::AlreadyScanned).with_detail("scanned_at", at));
    }

    let now = shared::util::now_millis();
    let stamped = match scan_type {
        ScanType::Wristband => order::stamp_wristband(pool, o.id, now).await?,
        ScanType::Gate => {
            let gate = gate.unwrap_or("main");
            order::stamp_checkin(pool, o.id, now, gate).await?
        }
    };
    // a concurrent scan can win the race between the read and the stamp
    if !stamped {
        let o = order::find_by_id(pool, o.id).await?.unwrap_or(o);
        return Err(AppError::new(ErrorCode::AlreadyScanned)
            .with_detail("scanned_at", stamp_of(&o, scan_type).unwrap_or(now)));
    }

    let o = order::find_by_id(pool, o.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    tracing::info!(
        ticket = %o.ticket_code,
        scan = ?scan_type,
        gate = gate.unwrap_or("-"),
        date_mismatch,
        "Scan executed"
    );
    Ok(ScanResult::from_order(&o, scan_type, date_mismatch))
}
