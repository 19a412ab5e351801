//! Invoice form parsing
//!
//! [`InvoiceForm::validate`] checks every field and collects all failures;
//! [`InvoiceForm::parse`] is the strict variant that turns any failure into
//! one combined [`ValidationError`].

use super::{filters, validators};
use crate::core::error::ValidationError;
use crate::core::invoice::{self, InvoiceDraft, InvoiceStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_ID_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Raw submitted form fields, read-only
///
/// Deserializes from an urlencoded body, so it can be used directly with
/// `axum::Form`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field, `None` when it was not submitted
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Field name to the messages reported for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Every message, in field order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

/// Outcome of a collecting validation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(FieldErrors),
}

impl<T> Validation<T> {
    pub fn into_result(self) -> Result<T, FieldErrors> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(errors) => Err(errors),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

/// Validation rules for the create/update invoice form
pub struct InvoiceForm;

impl InvoiceForm {
    /// Check all fields, collecting every failure.
    pub fn validate(form: &FormData) -> Validation<InvoiceDraft> {
        let trim = filters::trim();
        let mut errors = FieldErrors::new();

        let customer_id = validators::required_string(CUSTOMER_ID_MESSAGE)(
            form.get(CUSTOMER_ID_FIELD),
        )
        .map_err(|msg| errors.add(CUSTOMER_ID_FIELD, msg))
        .ok();

        let amount_raw = form.get(AMOUNT_FIELD).map(|raw| trim(raw));
        let amount = validators::positive_number(AMOUNT_MESSAGE)(amount_raw.as_deref())
            .and_then(|amount| match invoice::to_cents(amount) {
                Some(_) => Ok(amount),
                None => Err(AMOUNT_MESSAGE.to_string()),
            })
            .map_err(|msg| errors.add(AMOUNT_FIELD, msg))
            .ok();

        let status = validators::one_of::<InvoiceStatus>(STATUS_MESSAGE)(form.get(STATUS_FIELD))
            .map_err(|msg| errors.add(STATUS_FIELD, msg))
            .ok();

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Validation::Valid(InvoiceDraft {
                customer_id,
                amount,
                status,
            }),
            _ => Validation::Invalid(errors),
        }
    }

    /// Strict variant: any invalid field fails the whole form with one
    /// combined error.
    pub fn parse(form: &FormData) -> Result<InvoiceDraft, ValidationError> {
        Self::validate(form)
            .into_result()
            .map_err(ValidationError::combined)
    }
}
