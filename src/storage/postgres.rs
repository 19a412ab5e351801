//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, an [`InvoiceStore`] backed by a
//! PostgreSQL database via `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-actions = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! One `invoices` table; ids are generated by the database
//! (`gen_random_uuid()`, PostgreSQL 13+). Callers pass ids as text and every
//! statement casts them (`$1::uuid`), so a malformed id surfaces as a query
//! error rather than a silent miss.

use crate::core::invoice::{Invoice, InvoiceStatus, NewInvoice};
use crate::core::store::InvoiceStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Apply the required table (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id TEXT NOT NULL,
            amount BIGINT NOT NULL,
            status VARCHAR(16) NOT NULL,
            date DATE NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create invoices table: {}", e))?;

    Ok(())
}

const INVOICE_COLUMNS: &str = "id::text AS id, customer_id, amount, status, date";

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    customer_id: String,
    amount: i64,
    status: String,
    date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = anyhow::Error;

    fn try_from(row: InvoiceRow) -> Result<Self> {
        Ok(Invoice {
            status: row.status.parse::<InvoiceStatus>().map_err(|e| anyhow!(e))?,
            id: row.id,
            customer_id: row.customer_id,
            amount: row.amount,
            date: row.date,
        })
    }
}

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use sqlx::PgPool;
/// use invoice_actions::storage::PostgresInvoiceStore;
///
/// let pool = PgPool::connect("postgres://localhost/dashboard").await?;
/// invoice_actions::storage::postgres::ensure_schema(&pool).await?;
/// let store = PostgresInvoiceStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Create a new `PostgresInvoiceStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert(&self, new: NewInvoice) -> Result<Invoice> {
        let sql = format!(
            "INSERT INTO invoices (customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            INVOICE_COLUMNS
        );

        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(&new.customer_id)
            .bind(new.amount_cents)
            .bind(new.status.as_str())
            .bind(new.date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to insert invoice: {}", e))?;

        row.try_into()
    }

    async fn update(
        &self,
        id: &str,
        customer_id: &str,
        amount_cents: i64,
        status: InvoiceStatus,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE invoices SET customer_id = $1, amount = $2, status = $3 WHERE id = $4::uuid",
        )
        .bind(customer_id)
        .bind(amount_cents)
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1::uuid", INVOICE_COLUMNS);

        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to get invoice: {}", e))?;

        row.map(Invoice::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        let sql = format!(
            "SELECT {} FROM invoices ORDER BY date DESC, id",
            INVOICE_COLUMNS
        );

        let rows = sqlx::query_as::<_, InvoiceRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list invoices: {}", e))?;

        rows.into_iter().map(Invoice::try_from).collect()
    }
}
