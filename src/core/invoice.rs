//! Invoice record and the values derived from a validated form

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Wire/storage form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    /// Exact match only: `"Paid"` or `" paid"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// A persisted invoice row
///
/// `amount` is stored in minor units (cents). `id` and `date` are assigned
/// when the row is inserted and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Validated form payload shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    /// Major units as entered by the user; finite, > 0 and within `i64`
    /// cents when produced by validation.
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Amount converted to minor units, rounded to the nearest cent.
    ///
    /// `None` when the cents do not fit in an `i64`.
    pub fn amount_in_cents(&self) -> Option<i64> {
        to_cents(self.amount)
    }

    /// Build the row to insert, dated `date`.
    pub fn into_new_invoice(self, date: NaiveDate) -> Option<NewInvoice> {
        Some(NewInvoice {
            amount_cents: self.amount_in_cents()?,
            customer_id: self.customer_id,
            status: self.status,
            date,
        })
    }
}

/// Row handed to the store on insert; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Convert a major-unit amount to minor units, rounding half away from zero.
///
/// Returns `None` for non-finite amounts and for cents outside the `i64`
/// range. `i64::MAX as f64` is exactly 2^63, hence the strict upper bound.
pub fn to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    (cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64)
        .then_some(cents as i64)
}

/// Current UTC calendar date, the creation date of new invoices.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
