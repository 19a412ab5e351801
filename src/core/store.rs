//! Store trait for invoice persistence

use crate::core::invoice::{Invoice, InvoiceStatus, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;

/// Relational store holding invoice rows
///
/// Implementations must bind every value as a query parameter. Errors are
/// opaque to callers: the action layer never inspects them beyond logging.
/// Ids are opaque strings; an id that matches no row is not an error.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new row; the store assigns the id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Overwrite customer, amount and status of a row
    ///
    /// # Returns
    /// Number of rows affected (0 when `id` does not exist)
    async fn update(
        &self,
        id: &str,
        customer_id: &str,
        amount_cents: i64,
        status: InvoiceStatus,
    ) -> Result<u64>;

    /// Remove a row
    ///
    /// # Returns
    /// Number of rows affected (0 when `id` does not exist)
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Get a row by id
    async fn get(&self, id: &str) -> Result<Option<Invoice>>;

    /// All rows, newest date first
    async fn list(&self) -> Result<Vec<Invoice>>;
}
