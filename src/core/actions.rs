//! Invoice form actions: validate, mutate, then apply effects
//!
//! Every action walks the same states:
//!
//! ```text
//! Received ─▶ Validating ─┬─▶ Failed(field errors)
//!                         └─▶ Executing ─┬─▶ Failed(store message)
//!                                        └─▶ EffectsApplied ─▶ Redirect | Completed
//! ```
//!
//! Failures skip every effect: no cache revalidation, no event, no redirect.
//! Store errors are logged with their cause and replaced by the fixed
//! message for the operation. Nothing is retried.

use crate::core::cache::CacheInvalidator;
use crate::core::effects::ActionOutcome;
use crate::core::error::{ActionResult, Operation, StoreError, ValidationError};
use crate::core::events::{EventBus, InvoiceEvent};
use crate::core::invoice::{self, InvoiceDraft};
use crate::core::store::InvoiceStore;
use crate::core::validation::form::{AMOUNT_FIELD, AMOUNT_MESSAGE};
use crate::core::validation::{FieldErrors, FormData, InvoiceForm, Validation};
use chrono::NaiveDate;
use std::sync::Arc;

/// Create, update and delete actions bound to a store and a view cache
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn CacheInvalidator>,
    invoices_path: String,
    event_bus: Option<Arc<EventBus>>,
    today: fn() -> NaiveDate,
}

impl InvoiceActions {
    /// `invoices_path` is both the revalidated view and the redirect target
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        cache: Arc<dyn CacheInvalidator>,
        invoices_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            invoices_path: invoices_path.into(),
            event_bus: None,
            today: invoice::today,
        }
    }

    /// Publish an [`InvoiceEvent`] after every committed mutation
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Override the creation-date source (UTC today by default)
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn invoices_path(&self) -> &str {
        &self.invoices_path
    }

    /// Validate the form and insert a new invoice dated today
    pub async fn create_invoice(&self, form: &FormData) -> ActionOutcome {
        match InvoiceForm::validate(form) {
            Validation::Valid(draft) => self.execute_create(draft).await,
            Validation::Invalid(errors) => {
                ValidationError::for_operation(Operation::Create, errors).into()
            }
        }
    }

    /// Strict variant of [`create_invoice`](Self::create_invoice): an invalid
    /// form is an `Err` instead of a failed outcome
    pub async fn try_create_invoice(&self, form: &FormData) -> ActionResult<ActionOutcome> {
        let draft = InvoiceForm::parse(form)?;
        Ok(self.execute_create(draft).await)
    }

    /// Validate the form and overwrite customer, amount and status of `id`
    ///
    /// An `id` matching no row is a silent success.
    pub async fn update_invoice(&self, id: &str, form: &FormData) -> ActionOutcome {
        match InvoiceForm::validate(form) {
            Validation::Valid(draft) => self.execute_update(id, draft).await,
            Validation::Invalid(errors) => {
                ValidationError::for_operation(Operation::Update, errors).into()
            }
        }
    }

    /// Strict variant of [`update_invoice`](Self::update_invoice)
    pub async fn try_update_invoice(
        &self,
        id: &str,
        form: &FormData,
    ) -> ActionResult<ActionOutcome> {
        let draft = InvoiceForm::parse(form)?;
        Ok(self.execute_update(id, draft).await)
    }

    /// Remove `id`, revalidating the list view but not navigating
    ///
    /// An `id` matching no row is a silent success.
    pub async fn delete_invoice(&self, id: &str) -> ActionOutcome {
        let rows_affected = match self.store.delete(id).await {
            Ok(rows) => rows,
            Err(err) => return self.store_failure(Operation::Delete, err),
        };

        tracing::info!(invoice_id = id, rows_affected, "invoice deleted");
        self.cache.revalidate_path(&self.invoices_path);
        self.publish(InvoiceEvent::Deleted {
            invoice_id: id.to_string(),
            rows_affected,
        });
        ActionOutcome::Completed
    }

    async fn execute_create(&self, draft: InvoiceDraft) -> ActionOutcome {
        let Some(row) = draft.into_new_invoice((self.today)()) else {
            return amount_out_of_range(Operation::Create);
        };

        let invoice = match self.store.insert(row).await {
            Ok(invoice) => invoice,
            Err(err) => return self.store_failure(Operation::Create, err),
        };

        tracing::info!(
            invoice_id = %invoice.id,
            amount = invoice.amount,
            status = %invoice.status,
            "invoice created"
        );
        self.cache.revalidate_path(&self.invoices_path);
        self.publish(InvoiceEvent::Created { invoice });
        ActionOutcome::redirect(&self.invoices_path)
    }

    async fn execute_update(&self, id: &str, draft: InvoiceDraft) -> ActionOutcome {
        let Some(amount) = draft.amount_in_cents() else {
            return amount_out_of_range(Operation::Update);
        };

        let rows_affected = match self
            .store
            .update(id, &draft.customer_id, amount, draft.status)
            .await
        {
            Ok(rows) => rows,
            Err(err) => return self.store_failure(Operation::Update, err),
        };

        tracing::info!(invoice_id = id, amount, rows_affected, "invoice updated");
        self.cache.revalidate_path(&self.invoices_path);
        self.publish(InvoiceEvent::Updated {
            invoice_id: id.to_string(),
            customer_id: draft.customer_id,
            amount,
            status: draft.status,
            rows_affected,
        });
        ActionOutcome::redirect(&self.invoices_path)
    }

    fn store_failure(&self, operation: Operation, err: anyhow::Error) -> ActionOutcome {
        tracing::error!(%operation, error = %err, "invoice store failure");
        StoreError::new(operation, err).into()
    }

    fn publish(&self, event: InvoiceEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

/// A draft whose amount has no `i64` cents representation
fn amount_out_of_range(operation: Operation) -> ActionOutcome {
    let mut errors = FieldErrors::new();
    errors.add(AMOUNT_FIELD, AMOUNT_MESSAGE);
    ValidationError::for_operation(operation, errors).into()
}
