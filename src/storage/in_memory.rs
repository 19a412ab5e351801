//! In-memory implementation of InvoiceStore for testing and development

use crate::core::invoice::{Invoice, InvoiceStatus, NewInvoice};
use crate::core::store::InvoiceStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Ids are random UUIDs rendered as strings. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self {
            invoices: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a row with a caller-chosen id, replacing any existing one
    pub fn with_invoice(self, invoice: Invoice) -> Result<Self> {
        self.invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .insert(invoice.id.clone(), invoice);
        Ok(self)
    }
}

impl Default for InMemoryInvoiceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, new: NewInvoice) -> Result<Invoice> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id,
            amount: new.amount_cents,
            status: new.status,
            date: new.date,
        };
        invoices.insert(invoice.id.clone(), invoice.clone());

        Ok(invoice)
    }

    async fn update(
        &self,
        id: &str,
        customer_id: &str,
        amount_cents: i64,
        status: InvoiceStatus,
    ) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(invoice) = invoices.get_mut(id) else {
            return Ok(0);
        };
        invoice.customer_id = customer_id.to_string();
        invoice.amount = amount_cents;
        invoice.status = status;

        Ok(1)
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.remove(id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_invoice(customer: &str, cents: i64, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: customer.to_string(),
            amount_cents: cents,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_uuid_id() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 5000, 1)).await.unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.amount, 5000);
        assert_eq!(store.get(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_update_existing_row_keeps_date() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 3)).await.unwrap();

        let rows = store
            .update(&created.id, "c2", 7550, InvoiceStatus::Paid)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let updated = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.customer_id, "c2");
        assert_eq!(updated.amount, 7550);
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert_eq!(updated.date, created.date);
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_nothing() {
        let store = InMemoryInvoiceStore::new();
        let rows = store
            .update("nope", "c2", 1, InvoiceStatus::Paid)
            .await
            .unwrap();
        assert_eq!(rows, 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 3)).await.unwrap();

        assert_eq!(store.delete(&created.id).await.unwrap(), 1);
        assert_eq!(store.delete(&created.id).await.unwrap(), 0);
        assert!(store.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = InMemoryInvoiceStore::new();
        store.insert(new_invoice("old", 1, 1)).await.unwrap();
        store.insert(new_invoice("new", 2, 20)).await.unwrap();
        store.insert(new_invoice("mid", 3, 10)).await.unwrap();

        let customers: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.customer_id)
            .collect();
        assert_eq!(customers, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_with_invoice_seeds_fixed_id() {
        let store = InMemoryInvoiceStore::new()
            .with_invoice(Invoice {
                id: "inv1".to_string(),
                customer_id: "c1".to_string(),
                amount: 100,
                status: InvoiceStatus::Pending,
                date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            })
            .unwrap();
        assert!(store.get("inv1").await.unwrap().is_some());
    }
}
