//! # invoice-actions
//!
//! Server-side form actions for an invoice dashboard: create, update and
//! delete an invoice with validation, parameterized SQL, cache revalidation
//! and a redirect back to the list view.
//!
//! ## Features
//!
//! - **Collecting validation**: every field is checked, errors come back as a
//!   field → messages map plus a summary message
//! - **Strict validation**: any invalid field fails with one combined error
//! - **Parameterized storage**: in-memory store by default, PostgreSQL via
//!   `sqlx` behind the `postgres` feature
//! - **Effects as values**: success yields `Redirect` or `Completed`, failure
//!   yields `Failed(state)`; nothing panics or diverges
//! - **Axum integration**: `ServerBuilder` exposes the actions as
//!   urlencoded form endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_actions::prelude::*;
//!
//! let store = Arc::new(InMemoryInvoiceStore::new());
//! let views = Arc::new(ViewCache::new());
//! let actions = InvoiceActions::new(store, views, "/dashboard/invoices");
//!
//! let form: FormData = [("customerId", "c1"), ("amount", "50"), ("status", "pending")]
//!     .into_iter()
//!     .collect();
//!
//! match actions.create_invoice(&form).await {
//!     ActionOutcome::Redirect { to } => println!("go to {}", to),
//!     ActionOutcome::Failed(state) => println!("{}", state.message),
//!     ActionOutcome::Completed => {}
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::core::{
        actions::InvoiceActions,
        effects::{ActionOutcome, ActionState},
        events::{EventBus, EventEnvelope, InvoiceEvent},
    };

    // === Model & Validation ===
    pub use crate::core::{
        invoice::{Invoice, InvoiceDraft, InvoiceStatus, NewInvoice},
        validation::{FieldErrors, FormData, InvoiceForm, Validation},
    };

    // === Errors ===
    pub use crate::core::error::{
        ActionError, ActionResult, ConfigError, Operation, StoreError, ValidationError,
    };

    // === Storage & Cache ===
    pub use crate::core::{
        cache::{CacheInvalidator, ViewCache},
        store::InvoiceStore,
    };
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config & Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
