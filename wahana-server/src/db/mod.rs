//! Database module
//!
//! SQLite connection pool and schema bootstrap.

pub mod repository;

use shared::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database service owning the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pool: SqlitePool,
}

impl DbService {
    /// Open the database with WAL mode and create the schema if missing
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        create_schema(&pool)
            .await
            .map_err(|e| AppError::database(format!("Schema creation failed: {e}")))?;

        tracing::info!("Database ready (SQLite WAL, busy_timeout=5000ms)");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn into_pool(self) -> SqlitePool {
        self.pool
    }
}

/// Create all tables and indexes
///
/// Unique indexes on `invoice_number`, `ticket_code`, `promo.code` and
/// `deposit_transaction.external_id` are the authoritative guards against
/// generation races.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS ticket (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            slug TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL DEFAULT 'personal',
            is_active INTEGER NOT NULL DEFAULT 1,
            price_adult INTEGER NOT NULL DEFAULT 0,
            price_child INTEGER NOT NULL DEFAULT 0,
            price_general INTEGER NOT NULL DEFAULT 0,
            price_weekend_adult INTEGER,
            price_weekend_child INTEGER,
            price_weekend_general INTEGER,
            price_highseason_adult INTEGER,
            price_highseason_child INTEGER,
            price_highseason_general INTEGER,
            price_reseller_adult INTEGER,
            price_reseller_child INTEGER,
            price_reseller_general INTEGER
        )",
        "CREATE TABLE IF NOT EXISTS addon (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            slug TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL DEFAULT 'personal',
            is_active INTEGER NOT NULL DEFAULT 1,
            price INTEGER NOT NULL DEFAULT 0,
            price_reseller INTEGER
        )",
        "CREATE TABLE IF NOT EXISTS date_override (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL,
            note TEXT
        )",
        "CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY,
            ticket_code TEXT NOT NULL UNIQUE,
            invoice_number TEXT NOT NULL UNIQUE,
            visit_date TEXT NOT NULL,
            visit_type TEXT NOT NULL,
            details TEXT NOT NULL,
            customer_name TEXT NOT NULL,
            customer_email TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            subtotal INTEGER NOT NULL,
            discount_amount INTEGER NOT NULL DEFAULT 0,
            total_price INTEGER NOT NULL,
            promo_code TEXT,
            payment_method TEXT NOT NULL,
            payment_status TEXT NOT NULL DEFAULT 'pending',
            gateway_invoice_id TEXT,
            gateway_invoice_url TEXT,
            reseller_id INTEGER,
            partner_id INTEGER,
            created_at INTEGER NOT NULL,
            expires_at INTEGER NOT NULL,
            wristband_at INTEGER,
            checkin_at INTEGER,
            checkin_gate TEXT
        )",
        "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (payment_status)",
        "CREATE INDEX IF NOT EXISTS idx_orders_visit_date ON orders (visit_date)",
        "CREATE TABLE IF NOT EXISTS invoice_counter (
            day TEXT PRIMARY KEY,
            seq INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS reseller (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            agency TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            deposit_balance INTEGER NOT NULL DEFAULT 0,
            deposit_expires_at INTEGER,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS deposit_transaction (
            id INTEGER PRIMARY KEY,
            reseller_id INTEGER NOT NULL REFERENCES reseller(id),
            amount INTEGER NOT NULL,
            kind TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            external_id TEXT UNIQUE,
            gateway_invoice_id TEXT,
            gateway_invoice_url TEXT,
            description TEXT,
            created_at INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS promo (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            discount_type TEXT NOT NULL,
            value INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS partner (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            phone TEXT NOT NULL UNIQUE,
            email TEXT,
            fee_percentage INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            venue_name TEXT NOT NULL DEFAULT '',
            venue_info TEXT,
            payment_timeout_minutes INTEGER NOT NULL DEFAULT 60,
            weekly_closed_days TEXT NOT NULL DEFAULT '',
            webhook_token TEXT,
            min_group_order INTEGER NOT NULL DEFAULT 20,
            min_reseller_deposit INTEGER NOT NULL DEFAULT 100000000,
            min_reseller_deposit_renewal INTEGER NOT NULL DEFAULT 50000000,
            reseller_deposit_duration_days INTEGER NOT NULL DEFAULT 365
        )",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}
