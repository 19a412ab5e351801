//! Shared fixtures for the integration tests

#![allow(dead_code)]

use invoice_actions::prelude::*;

pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Build a form from `(field, value)` pairs
pub fn form(pairs: &[(&str, &str)]) -> FormData {
    pairs.iter().copied().collect()
}

/// Store whose every call fails, standing in for an unreachable database
#[derive(Debug, Default, Clone)]
pub struct FailingStore;

#[async_trait]
impl InvoiceStore for FailingStore {
    async fn insert(&self, _invoice: NewInvoice) -> Result<Invoice> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn update(
        &self,
        _id: &str,
        _customer_id: &str,
        _amount_cents: i64,
        _status: InvoiceStatus,
    ) -> Result<u64> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn delete(&self, _id: &str) -> Result<u64> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn get(&self, _id: &str) -> Result<Option<Invoice>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

/// An existing invoice with a fixed id, dated in the past
pub fn seeded_invoice(id: &str) -> Invoice {
    Invoice {
        id: id.to_string(),
        customer_id: "c1".to_string(),
        amount: 1000,
        status: InvoiceStatus::Pending,
        date: chrono::NaiveDate::from_ymd_opt(2023, 11, 14).unwrap(),
    }
}
