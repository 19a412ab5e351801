//! Validation and filtering system
//!
//! Raw form values pass through the filters, then the validators, before
//! anything reaches the store. Validation is an explicit function per form
//! returning a tagged result instead of a declarative schema.

pub mod filters;
pub mod form;
pub mod validators;

pub use form::{FieldErrors, FormData, InvoiceForm, Validation};
