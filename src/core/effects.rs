//! What an action hands back to its caller

use crate::core::error::{StoreError, ValidationError};
use crate::core::validation::FieldErrors;
use serde::Serialize;

/// Form state returned on a failed action
///
/// Serializes as `{"message": "...", "errors": {"amount": ["..."]}}`;
/// `errors` is omitted for store failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionState {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ActionState {
    pub fn is_validation_failure(&self) -> bool {
        self.errors.is_some()
    }
}

impl From<ValidationError> for ActionState {
    fn from(err: ValidationError) -> Self {
        Self {
            message: err.message,
            errors: Some(err.errors),
        }
    }
}

impl From<StoreError> for ActionState {
    fn from(err: StoreError) -> Self {
        Self {
            message: err.message(),
            errors: None,
        }
    }
}

/// Terminal state of one action invocation
///
/// Navigation is modelled as a value: the caller decides how to perform the
/// redirect (HTTP 303, client-side routing, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Mutation committed, cache revalidated; navigate to `to`
    Redirect { to: String },
    /// Mutation committed, cache revalidated; stay where you are
    Completed,
    /// Nothing committed, no effects applied
    Failed(ActionState),
}

impl ActionOutcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        ActionOutcome::Redirect { to: to.into() }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ActionOutcome::Failed(_))
    }

    /// Redirect target, if this outcome navigates
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect { to } => Some(to),
            _ => None,
        }
    }

    /// Failure state, if this outcome failed
    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::Failed(state) => Some(state),
            _ => None,
        }
    }
}

impl From<ValidationError> for ActionOutcome {
    fn from(err: ValidationError) -> Self {
        ActionOutcome::Failed(err.into())
    }
}

impl From<StoreError> for ActionOutcome {
    fn from(err: StoreError) -> Self {
        ActionOutcome::Failed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Operation;

    #[test]
    fn test_store_failure_state_has_no_errors() {
        let outcome: ActionOutcome = StoreError::new(Operation::Update, "timeout").into();
        let state = outcome.state().unwrap();
        assert_eq!(state.message, "Database Error: Failed to Update Invoice.");
        assert!(!state.is_validation_failure());

        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Database Error: Failed to Update Invoice." })
        );
    }

    #[test]
    fn test_validation_failure_state_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("status", "Please select an invoice status.");
        let outcome: ActionOutcome =
            ValidationError::for_operation(Operation::Create, errors).into();

        assert!(!outcome.is_success());
        let json = serde_json::to_value(outcome.state().unwrap()).unwrap();
        assert_eq!(json["message"], "Missing Fields. Failed to Create Invoice.");
        assert_eq!(json["errors"]["status"][0], "Please select an invoice status.");
    }

    #[test]
    fn test_redirect_accessors() {
        let outcome = ActionOutcome::redirect("/dashboard/invoices");
        assert!(outcome.is_success());
        assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));
        assert!(outcome.state().is_none());
        assert_eq!(ActionOutcome::Completed.redirect_target(), None);
    }
}
