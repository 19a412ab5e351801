//! Core module: invoice model, validation, actions and their effects

pub mod actions;
pub mod cache;
pub mod effects;
pub mod error;
pub mod events;
pub mod invoice;
pub mod store;
pub mod validation;

pub use actions::InvoiceActions;
pub use cache::{CacheInvalidator, ViewCache};
pub use effects::{ActionOutcome, ActionState};
pub use error::{ActionError, ActionResult, Operation, StoreError, ValidationError};
pub use events::{EventBus, InvoiceEvent};
pub use invoice::{Invoice, InvoiceDraft, InvoiceStatus, NewInvoice};
pub use store::InvoiceStore;
pub use validation::{FieldErrors, FormData, InvoiceForm, Validation};
