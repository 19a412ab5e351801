//! Typed error handling for invoice actions
//!
//! # Error Categories
//!
//! - [`ValidationError`]: the submitted form failed one or more field rules
//! - [`StoreError`]: the relational store rejected a mutation
//! - [`ConfigError`]: configuration could not be loaded
//!
//! Validation and store failures never escape the action layer as `Err`;
//! they are folded into [`ActionOutcome::Failed`](crate::core::effects::ActionOutcome).
//! [`ActionError`] exists for the outer layers (server, config loading) and
//! for the strict validation mode.

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The mutation an error or message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }

    /// Summary shown alongside field errors
    pub fn missing_fields_message(&self) -> String {
        format!("Missing Fields. Failed to {} Invoice.", self.verb())
    }

    /// The only message a store failure ever surfaces
    pub fn store_failure_message(&self) -> String {
        format!("Database Error: Failed to {} Invoice.", self.verb())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type of the crate
#[derive(Debug)]
pub enum ActionError {
    /// Form validation errors
    Validation(ValidationError),

    /// Store failures
    Store(StoreError),

    /// Configuration errors
    Config(ConfigError),

    /// Anything else (server bind failures and the like)
    Internal(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation(e) => write!(f, "{}", e),
            ActionError::Store(e) => write!(f, "{}", e),
            ActionError::Config(e) => write!(f, "{}", e),
            ActionError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Validation(e) => Some(e),
            ActionError::Store(e) => Some(e),
            ActionError::Config(e) => Some(e),
            ActionError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ActionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "VALIDATION_ERROR",
            ActionError::Store(_) => "STORE_ERROR",
            ActionError::Config(_) => "CONFIG_ERROR",
            ActionError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ActionError::Validation(e) => Some(serde_json::json!({ "fields": e.errors })),
            ActionError::Store(e) => Some(serde_json::json!({ "operation": e.operation })),
            _ => None,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// One or more form fields failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Summary message
    pub message: String,
    /// Messages per field
    pub errors: FieldErrors,
}

impl ValidationError {
    /// Errors reported by a create or update action
    pub fn for_operation(operation: Operation, errors: FieldErrors) -> Self {
        Self {
            message: operation.missing_fields_message(),
            errors,
        }
    }

    /// Single error carrying every field message, used by strict parsing
    pub fn combined(errors: FieldErrors) -> Self {
        let message = errors.messages().collect::<Vec<_>>().join(" ");
        Self { message, errors }
    }
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::Validation(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// A store mutation failed
///
/// The cause is kept for logging only; `Display` always yields the generic
/// message for the operation.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub operation: Operation,
    pub cause: String,
}

impl StoreError {
    pub fn new(operation: Operation, cause: impl fmt::Display) -> Self {
        Self {
            operation,
            cause: cause.to_string(),
        }
    }

    pub fn message(&self) -> String {
        self.operation.store_failure_message()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        ActionError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse a configuration file
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Failed to parse inline configuration
    #[error("Failed to parse config: {message}")]
    InvalidYaml { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<ConfigError> for ActionError {
    fn from(err: ConfigError) -> Self {
        ActionError::Config(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::InvalidYaml {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        ActionError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(config_err) => ActionError::Config(config_err),
            Err(err) => ActionError::Internal(err.to_string()),
        }
    }
}

/// A specialized Result type for invoice actions
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_errors() -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.add("amount", "Please enter amount greater than $0.");
        errors
    }

    #[test]
    fn test_operation_messages() {
        assert_eq!(
            Operation::Create.store_failure_message(),
            "Database Error: Failed to Create Invoice."
        );
        assert_eq!(
            Operation::Update.store_failure_message(),
            "Database Error: Failed to Update Invoice."
        );
        assert_eq!(
            Operation::Delete.store_failure_message(),
            "Database Error: Failed to Delete Invoice."
        );
        assert_eq!(
            Operation::Create.missing_fields_message(),
            "Missing Fields. Failed to Create Invoice."
        );
        assert_eq!(
            Operation::Update.missing_fields_message(),
            "Missing Fields. Failed to Update Invoice."
        );
    }

    #[test]
    fn test_store_error_hides_cause() {
        let err = StoreError::new(Operation::Create, "connection reset by peer");
        assert_eq!(err.to_string(), "Database Error: Failed to Create Invoice.");
        assert_eq!(err.cause, "connection reset by peer");
    }

    #[test]
    fn test_validation_error_status_code() {
        let err: ActionError =
            ValidationError::for_operation(Operation::Create, amount_errors()).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_store_error_status_code() {
        let err: ActionError = StoreError::new(Operation::Delete, "boom").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_error_response_includes_field_details() {
        let err = ActionError::Validation(ValidationError::for_operation(
            Operation::Update,
            amount_errors(),
        ));
        let response = err.to_response();
        assert_eq!(response.message, "Missing Fields. Failed to Update Invoice.");
        let details = response.details.unwrap();
        assert_eq!(
            details["fields"]["amount"][0],
            "Please enter amount greater than $0."
        );
    }

    #[test]
    fn test_combined_validation_error_joins_messages() {
        let mut errors = amount_errors();
        errors.add("status", "Please select an invoice status.");
        let err = ValidationError::combined(errors);
        assert_eq!(
            err.to_string(),
            "Please enter amount greater than $0. Please select an invoice status."
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/etc/invoices.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/invoices.yaml"));

        let err = ConfigError::ParseError {
            path: "app.yaml".to_string(),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse config file 'app.yaml': bad indent"
        );
    }

    #[test]
    fn test_anyhow_config_error_is_recovered() {
        let err = anyhow::Error::new(ConfigError::IoError {
            message: "denied".to_string(),
        });
        let action_err: ActionError = err.into();
        assert!(matches!(action_err, ActionError::Config(ConfigError::IoError { .. })));
    }
}
